//! The backend contract the screens are written against.

use async_trait::async_trait;

use photogroup_shared::constants::UPLOADS_PATH;
use photogroup_shared::protocol::{
    BlockRequest, BlockedUser, BulkActionRequest, GroupDetails, GroupMember, HideMediaRequest,
    JoinRequest, LeaveGroupRequest, LoginRequest, LoginResponse, ManageMemberRequest,
    ManageRequestRequest, MediaItem, PushTokenRequest, RegisterRequest, RegisterResponse,
    ReportRequest, ToggleJoiningRequest, UserProfile,
};
use photogroup_shared::{GroupId, MediaId, UserId};

use crate::error::NetResult;
use crate::forms::{GroupEdit, MediaUpload, ProfileUpdate};

/// One method per backend endpoint. Mutations resolve to `()` on any 2xx
/// status; the body is not inspected.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base URL without a trailing slash.
    fn base_url(&self) -> &str;

    /// Public URL of a file in the backend's uploads directory.
    fn media_url(&self, file_name: &str) -> String {
        format!("{}/{}/{}", self.base_url(), UPLOADS_PATH, file_name)
    }

    // --- Auth ---
    async fn login(&self, req: &LoginRequest) -> NetResult<LoginResponse>;
    async fn register(&self, req: &RegisterRequest) -> NetResult<RegisterResponse>;
    async fn update_push_token(&self, req: &PushTokenRequest) -> NetResult<()>;

    // --- Users ---
    async fn get_user(&self, user_id: UserId) -> NetResult<UserProfile>;
    async fn update_profile(&self, update: &ProfileUpdate) -> NetResult<()>;
    async fn get_blocked_users(&self, user_id: UserId) -> NetResult<Vec<BlockedUser>>;
    async fn block_user(&self, req: &BlockRequest) -> NetResult<()>;
    async fn unblock_user(&self, req: &BlockRequest) -> NetResult<()>;
    async fn delete_account(&self, user_id: UserId) -> NetResult<()>;

    // --- Groups ---
    async fn get_group_details(&self, group_id: GroupId) -> NetResult<GroupDetails>;
    async fn get_group_members(
        &self,
        group_id: GroupId,
        current_user_id: UserId,
    ) -> NetResult<Vec<GroupMember>>;
    async fn get_group_requests(&self, group_id: GroupId) -> NetResult<Vec<JoinRequest>>;
    async fn manage_member(&self, req: &ManageMemberRequest) -> NetResult<()>;
    async fn manage_request(&self, req: &ManageRequestRequest) -> NetResult<()>;
    async fn toggle_joining(&self, req: &ToggleJoiningRequest) -> NetResult<()>;
    async fn leave_group(&self, req: &LeaveGroupRequest) -> NetResult<()>;
    async fn edit_group(&self, edit: &GroupEdit) -> NetResult<()>;

    // --- Media ---
    async fn upload_media(&self, upload: &MediaUpload) -> NetResult<()>;
    async fn group_media(&self, group_id: GroupId, user_id: UserId) -> NetResult<Vec<MediaItem>>;
    async fn bulk_action(&self, req: &BulkActionRequest) -> NetResult<()>;
    async fn hide_media(&self, req: &HideMediaRequest) -> NetResult<()>;
    async fn delete_media(&self, user_id: UserId, media_id: MediaId) -> NetResult<()>;
    async fn report_content(&self, req: &ReportRequest) -> NetResult<()>;
}
