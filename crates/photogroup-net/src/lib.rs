//! HTTP access to the PhotoGroup backend.
//!
//! Screens talk to the [`Backend`] trait; [`HttpBackend`] is the reqwest
//! implementation used by the app.

pub mod backend;
pub mod endpoint;
pub mod error;
pub mod forms;
pub mod http;

pub use backend::Backend;
pub use endpoint::Endpoint;
pub use error::{NetError, NetResult};
pub use forms::{GroupEdit, LocalFile, MediaUpload, ProfileUpdate};
pub use http::{HttpBackend, HttpBackendConfig};
