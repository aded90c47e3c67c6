//! Console Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:9090/api/v1";

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_url: String,

    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,

    /// Where the session fields are persisted. `None` keeps them in memory only.
    pub session_file: Option<PathBuf>,

    /// Refuse dashboard routes whose menu entry needs a permission the user lacks
    pub enforce_route_permissions: bool,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let session_file = match env::var("ZW_SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => dirs::data_dir()
                .context("No data directory on this platform; set ZW_SESSION_FILE")?
                .join("zewotir")
                .join("session.json"),
        };

        Ok(Self {
            api_url: normalize_base_url(
                &env::var("ZW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            ),
            request_timeout: Duration::from_secs(
                env::var("ZW_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            session_file: Some(session_file),
            enforce_route_permissions: env_flag("ZW_ENFORCE_ROUTE_PERMISSIONS"),
            log_json: env_flag("ZW_LOG_JSON"),
        })
    }

    /// Create a configuration for tests: in-memory session, short timeout.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: Duration::from_secs(5),
            session_file: None,
            enforce_route_permissions: false,
            log_json: false,
        }
    }

    /// Same configuration pointed at another backend.
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
