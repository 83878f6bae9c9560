//! Types shared by every PhotoGroup crate: ids, backend wire DTOs, field
//! validators and app-wide constants.

pub mod constants;
pub mod error;
pub mod protocol;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use types::{GroupId, MediaId, MediaKind, RequestId, UserId};
