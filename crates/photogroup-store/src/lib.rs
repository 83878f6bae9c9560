//! # photogroup-store
//!
//! Device key-value storage for the PhotoGroup client, backed by SQLite.
//!
//! The app owns exactly one persisted record, the signed-in session. It is
//! kept as JSON under a well-known key in a small `kv` table so the storage
//! behaves like the platform key-value stores the app used before.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod session;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
