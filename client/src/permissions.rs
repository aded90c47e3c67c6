//! Permission Filter
//!
//! Fetches a role's permission set once per dashboard shell. A failed fetch
//! degrades to an empty set: every gated entry is hidden, nothing errors.
//!
//! Filtering is advisory. It decides what the menu shows, not which routes
//! are reachable; see `Config::enforce_route_permissions`.

use serde_json::Value;
use tracing::{debug, warn};
use zw_common::{Permission, PermissionSet};

use crate::navigation::{filter_menu, MenuView, NavSection};
use crate::network::ApiClient;

/// `loading -> ready`. There is no error state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Loading,
    Ready(PermissionSet),
}

/// Permission set for the lifetime of one dashboard shell.
#[derive(Debug, Clone, Default)]
pub struct PermissionFilter {
    state: PermissionState,
}

impl PermissionFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &PermissionState {
        &self.state
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, PermissionState::Ready(_))
    }

    #[must_use]
    pub const fn permissions(&self) -> Option<&PermissionSet> {
        match &self.state {
            PermissionState::Ready(set) => Some(set),
            PermissionState::Loading => None,
        }
    }

    /// Fetch the set for `role_id`. Does nothing once ready.
    pub async fn load(&mut self, api: &ApiClient, role_id: Option<&str>) {
        if self.is_ready() {
            return;
        }
        self.state = PermissionState::Ready(fetch_permissions(api, role_id).await);
    }

    /// Sidebar contents for the current state.
    #[must_use]
    pub fn menu(&self, tree: &[NavSection]) -> MenuView {
        match &self.state {
            PermissionState::Loading => MenuView::Placeholder,
            PermissionState::Ready(set) => MenuView::Sections(filter_menu(tree, set)),
        }
    }
}

/// `GET /roles/{roleId}/permissions`, normalized into a set.
///
/// No role id, or any failure, yields an empty set. Malformed entries are
/// dropped one by one.
pub async fn fetch_permissions(api: &ApiClient, role_id: Option<&str>) -> PermissionSet {
    let Some(role_id) = role_id.map(str::trim).filter(|id| !id.is_empty()) else {
        warn!("No role id in session, hiding permission-gated entries");
        return PermissionSet::new();
    };

    match api
        .get_list::<Value>(&format!("/roles/{role_id}/permissions"))
        .await
    {
        Ok(entries) => {
            let total = entries.len();
            let list: Vec<Permission> = entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect();
            if list.len() < total {
                warn!(
                    "Skipped {} malformed permission entries for role {}",
                    total - list.len(),
                    role_id
                );
            }
            let set: PermissionSet = list.iter().map(|p| p.name.as_str()).collect();
            debug!("Fetched {} permissions for role {}", set.len(), role_id);
            set
        }
        Err(e) => {
            warn!("Failed to fetch permissions for role {}: {}", role_id, e);
            PermissionSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::dashboard_menu;

    #[test]
    fn test_loading_shows_placeholder() {
        let filter = PermissionFilter::new();
        assert_eq!(filter.menu(&dashboard_menu()), MenuView::Placeholder);
        assert!(filter.permissions().is_none());
    }

    #[tokio::test]
    async fn test_missing_role_degrades_to_empty_set() {
        let config = crate::config::Config::default_for_test().with_api_url("http://127.0.0.1:9");
        let api = ApiClient::new(&config, crate::session::SessionStore::in_memory()).unwrap();

        let mut filter = PermissionFilter::new();
        filter.load(&api, Some("  ")).await;
        assert_eq!(filter.state(), &PermissionState::Ready(PermissionSet::new()));
        match filter.menu(&dashboard_menu()) {
            MenuView::Sections(sections) => assert_eq!(sections.len(), 2),
            MenuView::Placeholder => panic!("filter should be ready"),
        }
    }
}
