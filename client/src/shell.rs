//! Dashboard Shell
//!
//! Owns the session guard and the permission filter for one dashboard
//! session. Every navigation goes through [`DashboardShell::navigate`].

use tracing::{debug, info};

use crate::config::Config;
use crate::navigation::{dashboard_menu, required_permission, MenuView, NavSection};
use crate::network::ApiClient;
use crate::permissions::PermissionFilter;
use crate::session::{GuardOutcome, SessionGuard};

#[derive(Debug)]
pub struct DashboardShell {
    api: ApiClient,
    guard: SessionGuard,
    filter: PermissionFilter,
    tree: Vec<NavSection>,
    enforce_route_permissions: bool,
    current_route: Option<String>,
}

impl DashboardShell {
    #[must_use]
    pub fn new(config: &Config, api: ApiClient) -> Self {
        let guard = SessionGuard::new(api.clone(), api.session().clone());
        Self {
            api,
            guard,
            filter: PermissionFilter::new(),
            tree: dashboard_menu(),
            enforce_route_permissions: config.enforce_route_permissions,
            current_route: None,
        }
    }

    /// Guard a navigation, loading permissions on the first allowed one.
    pub async fn navigate(&mut self, route: &str) -> GuardOutcome {
        match self.guard.check(route).await {
            GuardOutcome::Allow(session) => {
                self.filter
                    .load(&self.api, session.role_id.as_deref())
                    .await;

                if self.enforce_route_permissions {
                    if let Some(permission) = required_permission(&self.tree, route) {
                        let held = self
                            .filter
                            .permissions()
                            .is_some_and(|set| set.allows(Some(permission)));
                        if !held {
                            info!("Refusing {}: missing {}", route, permission);
                            return GuardOutcome::Forbidden {
                                permission: permission.to_string(),
                            };
                        }
                    }
                }

                debug!("Navigated to {}", route);
                self.current_route = Some(route.to_string());
                GuardOutcome::Allow(session)
            }
            GuardOutcome::Redirect { to } => {
                self.filter = PermissionFilter::new();
                self.current_route = None;
                GuardOutcome::Redirect { to }
            }
            other => {
                self.current_route = Some(route.to_string());
                other
            }
        }
    }

    /// Sidebar for the current permission state.
    #[must_use]
    pub fn menu(&self) -> MenuView {
        self.filter.menu(&self.tree)
    }

    #[must_use]
    pub const fn filter(&self) -> &PermissionFilter {
        &self.filter
    }

    #[must_use]
    pub fn current_route(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionStore, LOGIN_ROUTE};

    #[tokio::test]
    async fn test_public_route_skips_guard_and_permissions() {
        let config = Config::default_for_test().with_api_url("http://127.0.0.1:9");
        let api = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        let mut shell = DashboardShell::new(&config, api);

        assert_eq!(shell.navigate(LOGIN_ROUTE).await, GuardOutcome::Public);
        assert_eq!(shell.menu(), MenuView::Placeholder);
        assert_eq!(shell.current_route(), Some(LOGIN_ROUTE));
    }

    #[tokio::test]
    async fn test_signed_out_dashboard_redirects() {
        let config = Config::default_for_test().with_api_url("http://127.0.0.1:9");
        let api = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        let mut shell = DashboardShell::new(&config, api);

        let outcome = shell.navigate("/dashboard").await;
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: LOGIN_ROUTE.to_string()
            }
        );
        assert!(shell.current_route().is_none());
    }
}
