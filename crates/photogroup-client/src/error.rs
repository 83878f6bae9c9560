use thiserror::Error;

use photogroup_media::CameraError;
use photogroup_net::NetError;
use photogroup_shared::constants::MAX_BULK_SELECTION;
use photogroup_shared::ValidationError;
use photogroup_store::StoreError;

use crate::ports::{Permission, VerificationError};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Backend error: {0}")]
    Net(#[from] NetError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Phone verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("{0} permission denied")]
    PermissionDenied(Permission),

    #[error("No internet connection")]
    Offline,

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Only group admins can do this")]
    NotAdmin,

    #[error("At most {max} items can be selected")]
    SelectionLimit { max: usize },

    #[error("Nothing changed")]
    NoChanges,

    #[error("{0}")]
    InvalidState(&'static str),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Title and message of the dialog shown for a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

impl ClientError {
    /// The dialog to show for this error. Server-provided text is shown when
    /// the backend sent one; everything else gets a generic message.
    pub fn alert(&self) -> Alert {
        match self {
            ClientError::Validation(e) => Alert::new("Missing information", e.to_string()),
            ClientError::Store(_) => Alert::new("Error", "Could not access device storage."),
            ClientError::Net(e) => match (e.status(), e.server_message()) {
                (_, Some(message)) => Alert::new("Error", message),
                (Some(_), None) => Alert::new("Error", "Something went wrong. Please try again."),
                (None, None) => Alert::new("Connection error", "Could not reach the server."),
            },
            ClientError::Camera(_) => Alert::new("Camera error", "Could not capture media."),
            ClientError::Verification(e) => match e {
                VerificationError::InvalidPhoneNumber => {
                    Alert::new("Error", "The phone number is invalid.")
                }
                VerificationError::QuotaExceeded => Alert::new("Error", "SMS quota exceeded."),
                VerificationError::InvalidCode => {
                    Alert::new("Error", "The code is wrong or has expired.")
                }
                VerificationError::Other(_) => {
                    Alert::new("Error", "Could not send the SMS. Please try again.")
                }
            },
            ClientError::PermissionDenied(p) => Alert::new(
                "Permission required",
                format!("Access to the {p} was denied."),
            ),
            ClientError::Offline => Alert::new(
                "Connection error",
                "Please make sure you are connected to the internet.",
            ),
            ClientError::NotLoggedIn => Alert::new("Session expired", "Please log in again."),
            ClientError::NotAdmin => Alert::new("Unauthorized", "Only group admins can do this."),
            ClientError::SelectionLimit { max } => {
                Alert::new("Warning", format!("You can select at most {max} items."))
            }
            ClientError::NoChanges => Alert::new("Info", "There is nothing to save."),
            ClientError::InvalidState(msg) => Alert::new("Error", *msg),
        }
    }

    pub fn selection_limit() -> Self {
        ClientError::SelectionLimit {
            max: MAX_BULK_SELECTION,
        }
    }
}
