//! Session Guard
//!
//! Runs on every navigation into `/dashboard`. The stored token is verified
//! against the backend each time; nothing is cached across navigations.
//! Any failure clears the session and redirects to the login route.

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, error, warn};
use zw_common::Session;

use super::store::SessionStore;
use crate::network::ApiClient;

/// Login route unauthenticated users are sent to.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Every route under this prefix needs a verified session.
pub const PROTECTED_PREFIX: &str = "/dashboard";

const VERIFY_PATH: &str = "/auth/verify/expiredToken";

/// Result of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Route is outside the protected area.
    Public,
    /// Session verified; protected content may render.
    Allow(Session),
    /// Session missing or rejected; go to `to`.
    Redirect { to: String },
    /// Session valid but the route needs a permission the user lacks.
    Forbidden { permission: String },
}

/// Whether `route` is inside the protected area.
#[must_use]
pub fn is_protected(route: &str) -> bool {
    let path = route.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Verifies the stored credential before protected routes render.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    api: ApiClient,
    store: SessionStore,
}

impl SessionGuard {
    #[must_use]
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Guard a navigation to `route`.
    pub async fn check(&self, route: &str) -> GuardOutcome {
        if !is_protected(route) {
            return GuardOutcome::Public;
        }

        let Some(session) = self.store.session().await else {
            debug!("No stored session for {}, redirecting to login", route);
            return self.reject().await;
        };

        match self.api.execute(Method::GET, VERIFY_PATH, None).await {
            Ok(_) => {
                debug!("Session verified for {}", route);
                GuardOutcome::Allow(session)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Token expired or rejected: {}", e);
                self.reject().await
            }
            Err(e) => {
                error!("Token verification failed: {}", e);
                self.reject().await
            }
        }
    }

    async fn reject(&self) -> GuardOutcome {
        if let Err(e) = self.store.clear().await {
            error!("Failed to clear session: {}", e);
        }
        GuardOutcome::Redirect {
            to: LOGIN_ROUTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_protected() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/"));
        assert!(is_protected("/dashboard/transactions"));
        assert!(is_protected("/dashboard/settings?tab=currency"));
        assert!(!is_protected("/dashboardx"));
        assert!(!is_protected("/auth/login"));
        assert!(!is_protected("/"));
    }

    #[tokio::test]
    async fn test_missing_session_redirects_without_network() {
        // Port 9 is discard; nothing should be sent anyway.
        let config = crate::config::Config::default_for_test().with_api_url("http://127.0.0.1:9");
        let store = SessionStore::in_memory();
        store.set_business_id(Some("b-1".into())).await.unwrap();
        let api = ApiClient::new(&config, store.clone()).unwrap();

        let outcome = SessionGuard::new(api, store.clone())
            .check("/dashboard/customer")
            .await;
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: LOGIN_ROUTE.into()
            }
        );
        assert_eq!(store.read().await.business_id, None);
    }
}
