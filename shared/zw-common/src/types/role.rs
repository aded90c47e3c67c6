//! Role Types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::permission::{normalize_permission, Permission};
use super::session::role_label;

/// Role with its granted permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl RoleDefinition {
    #[must_use]
    pub fn display_name(&self) -> String {
        role_label(&self.name)
    }
}

/// Every permission the console knows about, in catalogue order.
#[must_use]
pub fn permission_catalogue() -> Vec<Permission> {
    const ENTRIES: &[(&str, &str, &str)] = &[
        ("VIEW_TRANSACTIONS", "Payments", "View Transactions"),
        ("VIEW_CUSTOMERS", "Payments", "View Customers"),
        ("MANAGE_SUBACCOUNTS", "Payments", "Manage Subaccounts"),
        ("MANAGE_MICROFINANCE", "Tenants", "Manage Microfinance"),
        ("VIEW_COMPLIANCE", "Tenants", "View Compliance"),
        ("MANAGE_PORTFOLIO", "Content", "Manage Portfolio"),
        ("MANAGE_BLOG", "Content", "Manage Blog"),
        ("VIEW_INQUIRIES", "Content", "View Inquiries"),
        ("MANAGE_ROLES", "Administration", "Manage Roles"),
        ("MANAGE_SETTINGS", "Administration", "Manage Settings"),
    ];

    ENTRIES
        .iter()
        .map(|(name, category, action)| Permission {
            id: None,
            name: (*name).to_string(),
            category: Some((*category).to_string()),
            action: Some((*action).to_string()),
        })
        .collect()
}

/// Tri-state of a category checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    None,
    Some,
    All,
}

/// Editable permission selection for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSelection {
    catalogue: Vec<Permission>,
    selected: BTreeSet<String>,
}

impl PermissionSelection {
    /// Start from the role's current grants.
    #[must_use]
    pub fn new(catalogue: Vec<Permission>, role: &RoleDefinition) -> Self {
        let selected = role
            .permissions
            .iter()
            .filter_map(|p| normalize_permission(&p.name))
            .collect();
        Self {
            catalogue,
            selected,
        }
    }

    /// Categories with their permissions, in first-appearance order.
    #[must_use]
    pub fn groups(&self) -> Vec<(String, Vec<&Permission>)> {
        let mut groups: Vec<(String, Vec<&Permission>)> = Vec::new();
        for permission in &self.catalogue {
            let category = permission
                .category
                .clone()
                .unwrap_or_else(|| "Other".to_string());
            match groups.iter_mut().find(|(name, _)| *name == category) {
                Some((_, members)) => members.push(permission),
                None => groups.push((category, vec![permission])),
            }
        }
        groups
    }

    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        normalize_permission(name).is_some_and(|n| self.selected.contains(&n))
    }

    pub fn toggle_single(&mut self, name: &str, checked: bool) {
        let Some(name) = normalize_permission(name) else {
            return;
        };
        if checked {
            self.selected.insert(name);
        } else {
            self.selected.remove(&name);
        }
    }

    /// Check or uncheck every permission in `category`.
    pub fn toggle_group(&mut self, category: &str, checked: bool) {
        let members: Vec<String> = self
            .catalogue
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .filter_map(|p| normalize_permission(&p.name))
            .collect();
        for name in members {
            if checked {
                self.selected.insert(name);
            } else {
                self.selected.remove(&name);
            }
        }
    }

    #[must_use]
    pub fn group_state(&self, category: &str) -> GroupState {
        let (mut total, mut checked) = (0usize, 0usize);
        for permission in self
            .catalogue
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
        {
            total += 1;
            if self.is_selected(&permission.name) {
                checked += 1;
            }
        }
        match checked {
            0 => GroupState::None,
            n if n == total => GroupState::All,
            _ => GroupState::Some,
        }
    }

    /// Selected names, sorted.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
