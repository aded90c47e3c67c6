//! Dashboard Navigation
//!
//! Static menu tree and the permission-based filtering applied to it.

use serde::Serialize;
use zw_common::PermissionSet;

/// Menu entry. Sub-items form a collapsible group under their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub url: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<NavItem>,
}

impl NavItem {
    const fn link(title: &'static str, url: &'static str, permission: Option<&'static str>) -> Self {
        Self {
            title,
            url,
            permission,
            submenu: Vec::new(),
        }
    }

    fn with_submenu(mut self, submenu: Vec<Self>) -> Self {
        self.submenu = submenu;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

/// What the sidebar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "sections", rename_all = "snake_case")]
pub enum MenuView {
    /// Permissions still loading.
    Placeholder,
    Sections(Vec<NavSection>),
}

/// The full dashboard menu, before filtering.
#[must_use]
pub fn dashboard_menu() -> Vec<NavSection> {
    vec![
        NavSection {
            label: "Main",
            items: vec![
                NavItem::link("Dashboard", "/dashboard", None),
                NavItem::link("Transactions", "/dashboard/transactions", Some("VIEW_TRANSACTIONS")),
                NavItem::link("Customers", "/dashboard/customer", Some("VIEW_CUSTOMERS")),
                NavItem::link("Microfinance", "/dashboard/microfinance", Some("MANAGE_MICROFINANCE")),
                NavItem::link("Compliance", "/dashboard/compliance", Some("VIEW_COMPLIANCE")),
                NavItem::link("Subaccounts", "/dashboard/subaccounts", Some("MANAGE_SUBACCOUNTS")),
            ],
        },
        NavSection {
            label: "Content",
            items: vec![
                NavItem::link("Portfolio", "/dashboard/portfolio", Some("MANAGE_PORTFOLIO")),
                NavItem::link("Blog", "/dashboard/Blog", Some("MANAGE_BLOG")),
                NavItem::link("Inquiries", "/dashboard/Inquiries", Some("VIEW_INQUIRIES")),
                NavItem::link("FAQ", "/dashboard/faq", None),
            ],
        },
        NavSection {
            label: "Administration",
            items: vec![
                NavItem::link("Roles Management", "/dashboard/roles", Some("MANAGE_ROLES")),
                NavItem::link("Settings", "/dashboard/settings", Some("MANAGE_SETTINGS")).with_submenu(vec![
                    NavItem::link("Industries", "/dashboard/settings?tab=industry", None),
                    NavItem::link("States", "/dashboard/settings?tab=state", None),
                    NavItem::link("Sub-cities", "/dashboard/settings?tab=subcity", None),
                    NavItem::link("Staff sizes", "/dashboard/settings?tab=staffsize", None),
                    NavItem::link("Currencies", "/dashboard/settings?tab=currency", None),
                ]),
            ],
        },
    ]
}

fn filter_item(item: &NavItem, permissions: &PermissionSet) -> Option<NavItem> {
    if !permissions.allows(item.permission) {
        return None;
    }
    if item.submenu.is_empty() {
        return Some(item.clone());
    }
    let submenu: Vec<NavItem> = item
        .submenu
        .iter()
        .filter_map(|sub| filter_item(sub, permissions))
        .collect();
    if submenu.is_empty() {
        return None;
    }
    Some(NavItem {
        submenu,
        ..item.clone()
    })
}

/// Filtered copy of `tree`: declared order kept, empty sections dropped.
#[must_use]
pub fn filter_menu(tree: &[NavSection], permissions: &PermissionSet) -> Vec<NavSection> {
    tree.iter()
        .filter_map(|section| {
            let items: Vec<NavItem> = section
                .items
                .iter()
                .filter_map(|item| filter_item(item, permissions))
                .collect();
            (!items.is_empty()).then(|| NavSection {
                label: section.label,
                items,
            })
        })
        .collect()
}

#[must_use]
pub fn is_link_active(url: &str, current: &str) -> bool {
    url == current
}

/// A parent is active when it or any of its sub-items is.
#[must_use]
pub fn is_parent_active(item: &NavItem, current: &str) -> bool {
    is_link_active(item.url, current)
        || item.submenu.iter().any(|sub| is_link_active(sub.url, current))
}

fn path_of(route: &str) -> &str {
    let path = route.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn covers(url: &str, route: &str) -> bool {
    let (url, route) = (path_of(url), path_of(route));
    route == url || route.strip_prefix(url).is_some_and(|rest| rest.starts_with('/'))
}

/// Permission the menu declares for `route`, if any.
///
/// The deepest entry covering the route decides; an exact sub-item match
/// with its own requirement wins over its parent.
#[must_use]
pub fn required_permission(tree: &[NavSection], route: &str) -> Option<&'static str> {
    let mut best: Option<&NavItem> = None;
    for item in tree.iter().flat_map(|s| s.items.iter()) {
        if covers(item.url, route)
            && best.is_none_or(|b| path_of(item.url).len() > path_of(b.url).len())
        {
            best = Some(item);
        }
    }
    let item = best?;
    item.submenu
        .iter()
        .find(|sub| sub.url == route && sub.permission.is_some())
        .map_or(item.permission, |sub| sub.permission)
}
