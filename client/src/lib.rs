//! Zewotir Admin Console Library
//!
//! Client core of the admin dashboard: API client, session store and guard,
//! permission-filtered navigation and the resource views.

pub mod commands;
pub mod config;
pub mod error;
pub mod navigation;
pub mod network;
pub mod permissions;
pub mod resources;
pub mod session;
pub mod shell;

pub use config::Config;
pub use error::ApiError;
pub use network::ApiClient;
pub use resources::{ResourceView, Scope, ViewState};
pub use session::{GuardOutcome, SessionStore};
pub use shell::DashboardShell;

/// Shared handles for one console process.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,
}

impl AppState {
    /// Open the session store and build the API client around it.
    pub async fn from_config(config: Config) -> Result<Self, ApiError> {
        let session = match &config.session_file {
            Some(path) => SessionStore::open(path.clone()).await?,
            None => SessionStore::in_memory(),
        };
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Resource scope for the current session.
    pub async fn scope(&self) -> Scope {
        Scope::from_stored(&self.session.read().await)
    }

    #[must_use]
    pub fn shell(&self) -> DashboardShell {
        DashboardShell::new(&self.config, self.api.clone())
    }
}

/// Initialize Sentry when `SENTRY_DSN` is set. Keep the guard alive for the process.
#[must_use]
pub fn init_sentry() -> Option<sentry::ClientInitGuard> {
    std::env::var("SENTRY_DSN")
        .ok()
        .filter(|dsn| !dsn.is_empty())
        .map(|dsn| {
            sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    environment: Some(
                        std::env::var("APP_ENV")
                            .unwrap_or_else(|_| "development".to_string())
                            .into(),
                    ),
                    sample_rate: 1.0,
                    traces_sample_rate: 0.05,
                    send_default_pii: false,
                    auto_session_tracking: true,
                    ..Default::default()
                },
            ))
        })
}
