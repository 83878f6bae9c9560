//! JSON bodies exchanged with the PhotoGroup backend.
//!
//! Field names follow the backend's snake_case columns. Boolean flags arrive
//! as `0`/`1` integers from most endpoints, so they go through [`flag`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GroupId, MediaId, MediaKind, RequestId, UserId};

/// Serde adapter for backend flags: accepts `true`/`false`, `0`/`1` or
/// `null`, and writes `0`/`1`.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Bool(b)) => b,
            Some(Raw::Int(i)) => i != 0,
            None => false,
        })
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Full international number, e.g. `+905551234567`
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushTokenRequest {
    pub user_id: UserId,
    pub push_token: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user record as returned by `/get-user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// File name under the backend's uploads directory
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, with = "flag")]
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedUser {
    pub blocked_id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRequest {
    pub blocker_id: UserId,
    pub blocked_id: UserId,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GroupDetails {
    #[serde(default)]
    pub id: Option<GroupId>,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub group_code: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, with = "flag")]
    pub is_joining_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, with = "flag")]
    pub is_admin: bool,
    #[serde(default, with = "flag")]
    pub is_blocked_by_me: bool,
}

impl GroupMember {
    /// Small avatar, falling back to the full picture.
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.profile_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub request_id: RequestId,
    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberAction {
    Kick,
    Promote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accept,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageMemberRequest {
    pub admin_id: UserId,
    pub group_id: GroupId,
    pub target_user_id: UserId,
    pub action: MemberAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageRequestRequest {
    pub admin_id: UserId,
    pub group_id: GroupId,
    pub target_user_id: UserId,
    pub action: RequestDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleJoiningRequest {
    pub user_id: UserId,
    pub group_id: GroupId,
    #[serde(with = "flag")]
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveGroupRequest {
    pub user_id: UserId,
    pub group_id: GroupId,
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// One entry of a group's media list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub url: String,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: MediaKind,
    pub uploader_id: UserId,
    /// Uploader's username
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default, alias = "date")]
    pub uploaded_at: Option<String>,
}

impl MediaItem {
    /// Grid image: the thumbnail when the backend produced one.
    pub fn preview_url(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.url)
    }

    /// Upload time, accepting both RFC 2822 (`Tue, 15 Nov 1994 08:12:31 GMT`)
    /// and RFC 3339 timestamps.
    pub fn uploaded_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.uploaded_at.as_deref()?;
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// Tag carried by removal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalAction {
    /// Hidden for the requester only
    Hide,
    /// Deleted for every member
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionRequest {
    pub user_id: UserId,
    pub photo_ids: Vec<MediaId>,
    pub action_type: RemovalAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideMediaRequest {
    pub user_id: UserId,
    pub photo_id: MediaId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub reporter_id: UserId,
    pub photo_id: MediaId,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The server's explanation, preferring `error` over `message`.
    pub fn into_text(self) -> Option<String> {
        self.error.or(self.message).filter(|s| !s.is_empty())
    }
}
