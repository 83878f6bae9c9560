//! Records persisted in device storage.

use photogroup_shared::UserId;
use serde::{Deserialize, Serialize};

/// The signed-in user, created on login and destroyed on logout or account
/// deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub username: String,
    /// File name of the profile picture on the backend, if any.
    #[serde(default)]
    pub profile_image: Option<String>,
}
