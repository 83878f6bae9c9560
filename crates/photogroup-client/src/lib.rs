//! Headless core of the PhotoGroup mobile app.
//!
//! The UI shell calls [`init_tracing`] once, builds [`Devices`] from the
//! platform SDKs, and calls [`launch`] to get the [`AppContext`] every
//! screen in [`screens`] is created from.

pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod ports;
pub mod screens;
pub mod selection;
pub mod state;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use photogroup_net::HttpBackend;
use photogroup_shared::constants::APP_NAME;
use photogroup_store::Database;

pub use crate::config::ClientConfig;
pub use crate::error::{Alert, ClientError, ClientResult};
pub use crate::events::{AppEvent, EventBus};
pub use crate::ports::Devices;
pub use crate::state::{AppContext, AppState};

/// Installs the global log subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "photogroup_client=debug,photogroup_net=debug,photogroup_media=debug,photogroup_store=info,warn",
        )
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Opens device storage, connects the backend client and restores the
/// stored session.
pub fn launch(config: &ClientConfig, devices: Devices) -> ClientResult<AppContext> {
    tracing::info!(api_url = %config.api_url, "Starting {}", APP_NAME);

    let database = Database::new(config.data_dir.as_deref())?;
    let backend = HttpBackend::new(&config.backend_config())?;

    let ctx = AppContext::new(AppState::new(Some(database)), Arc::new(backend), devices);
    match ctx.restore_session()? {
        Some(session) => tracing::info!(user_id = %session.user_id, "Resuming session"),
        None => tracing::info!("No stored session"),
    }
    Ok(ctx)
}
