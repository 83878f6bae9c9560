//! Native services the host platform provides.
//!
//! The screens never touch an SDK directly: permission prompts, SMS
//! verification, push tokens, the image picker, connectivity and the camera
//! all come in through these traits, bundled as [`Devices`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use photogroup_media::Camera;
use photogroup_shared::MediaKind;

use crate::error::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Camera,
    MediaLibrary,
    Notifications,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::MediaLibrary => write!(f, "photo library"),
            Permission::Notifications => write!(f, "notification"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[async_trait]
pub trait Permissions: Send + Sync {
    async fn status(&self, permission: Permission) -> PermissionStatus;

    /// Shows the system prompt when the user has not decided yet.
    async fn request(&self, permission: Permission) -> PermissionStatus;
}

/// Asks for `permission` unless already granted.
pub async fn ensure_permission(
    permissions: &dyn Permissions,
    permission: Permission,
) -> ClientResult<()> {
    if permissions.status(permission).await == PermissionStatus::Granted {
        return Ok(());
    }
    match permissions.request(permission).await {
        PermissionStatus::Granted => Ok(()),
        status => {
            warn!(%permission, ?status, "Permission not granted");
            Err(ClientError::PermissionDenied(permission))
        }
    }
}

// ---------------------------------------------------------------------------
// Phone verification
// ---------------------------------------------------------------------------

/// Handle of a pending SMS challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid phone number")]
    InvalidPhoneNumber,
    #[error("SMS quota exceeded")]
    QuotaExceeded,
    #[error("invalid or expired code")]
    InvalidCode,
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait PhoneVerifier: Send + Sync {
    /// Sends the one-time code to `phone_number` (international form).
    async fn send_code(&self, phone_number: &str) -> Result<VerificationId, VerificationError>;

    async fn confirm(&self, id: &VerificationId, code: &str) -> Result<(), VerificationError>;
}

// ---------------------------------------------------------------------------
// Push notifications
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PushNotifications: Send + Sync {
    /// The device's push token; `None` when the platform has none to give.
    async fn device_token(&self) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Image picker
// ---------------------------------------------------------------------------

/// A file chosen or captured through the system picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedMedia {
    /// Local path, or a remote URL for the already-uploaded picture
    pub uri: String,
    pub kind: MediaKind,
}

impl PickedMedia {
    pub fn photo(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            kind: MediaKind::Photo,
        }
    }

    /// Files already on the server are referenced by URL.
    pub fn is_local(&self) -> bool {
        !self.uri.starts_with("http")
    }

    /// Filesystem path of a local file, without any `file://` scheme.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(self.uri.strip_prefix("file://").unwrap_or(&self.uri))
    }
}

/// All methods resolve to nothing when the user cancels.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Square-cropped photo from the camera.
    async fn capture_image(&self) -> Option<PickedMedia>;

    /// Square-cropped photo from the library.
    async fn pick_image(&self) -> Option<PickedMedia>;

    /// Multi-select of photos and videos from the library.
    async fn pick_media(&self) -> Vec<PickedMedia>;
}

// ---------------------------------------------------------------------------
// Connectivity
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_connected(&self) -> bool;
}

pub async fn ensure_online(connectivity: &dyn Connectivity) -> ClientResult<()> {
    if connectivity.is_connected().await {
        Ok(())
    } else {
        warn!("Device is offline");
        Err(ClientError::Offline)
    }
}

/// The platform services a running app is wired to.
#[derive(Clone)]
pub struct Devices {
    pub permissions: Arc<dyn Permissions>,
    pub phone: Arc<dyn PhoneVerifier>,
    pub push: Arc<dyn PushNotifications>,
    pub picker: Arc<dyn MediaPicker>,
    pub connectivity: Arc<dyn Connectivity>,
    pub camera: Arc<dyn Camera>,
}
