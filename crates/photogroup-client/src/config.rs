//! Client configuration loaded from environment variables.
//!
//! Every setting has a default, so a debug build runs against a backend on
//! `localhost:5000` with zero configuration.

use std::path::PathBuf;
use std::time::Duration;

use photogroup_net::HttpBackendConfig;
use photogroup_shared::constants::DEFAULT_API_URL;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash.
    /// Env: `PHOTOGROUP_API_URL`
    /// Default: `http://localhost:5000`
    pub api_url: String,

    /// Directory of the device storage file.
    /// Env: `PHOTOGROUP_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Send the tunnel's skip-interstitial header with every request.
    /// Env: `PHOTOGROUP_SKIP_TUNNEL_WARNING` (true/false)
    /// Default: `true`
    pub skip_tunnel_warning: bool,

    /// Per-request timeout.
    /// Env: `PHOTOGROUP_REQUEST_TIMEOUT_SECS`
    /// Default: none (requests wait indefinitely).
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            skip_tunnel_warning: true,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = var("PHOTOGROUP_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                tracing::warn!("Empty PHOTOGROUP_API_URL, using default");
            } else {
                config.api_url = url.to_string();
            }
        }

        if let Some(dir) = var("PHOTOGROUP_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = var("PHOTOGROUP_SKIP_TUNNEL_WARNING") {
            config.skip_tunnel_warning = val != "false" && val != "0";
        }

        if let Some(val) = var("PHOTOGROUP_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(0) => config.request_timeout = None,
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!(
                    value = %val,
                    "Invalid PHOTOGROUP_REQUEST_TIMEOUT_SECS, requests will not time out"
                ),
            }
        }

        // RUST_LOG is read by the tracing filter directly.

        config
    }

    pub fn backend_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.api_url.clone(),
            skip_tunnel_warning: self.skip_tunnel_warning,
            timeout: self.request_timeout,
        }
    }
}
