//! Permission Types
//!
//! Permission names are compared in normalized form: trimmed and uppercased.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Normalize a permission name. Blank names normalize to `None`.
#[must_use]
pub fn normalize_permission(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Permission entry as listed by the backend or the permission catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, deserialize_with = "crate::types::id::deserialize_opt")]
    pub id: Option<String>,
    /// Missing or `null` reads as blank, which normalizes away.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Permission {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: None,
            action: None,
        }
    }
}

/// Set of normalized permission names granted to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    names: HashSet<String>,
}

impl PermissionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set holds `name` after normalization.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        normalize_permission(name).is_some_and(|n| self.names.contains(&n))
    }

    /// Whether an entry requiring `required` may be shown.
    ///
    /// Entries without a requirement (or with a blank one) are always allowed.
    #[must_use]
    pub fn allows(&self, required: Option<&str>) -> bool {
        match required.and_then(normalize_permission) {
            None => true,
            Some(name) => self.names.contains(&name),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sorted names, for display.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: AsRef<str>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .filter_map(|n| normalize_permission(n.as_ref()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(
            normalize_permission("  view_transactions "),
            Some("VIEW_TRANSACTIONS".into())
        );
        assert_eq!(normalize_permission("   "), None);
    }

    #[test]
    fn test_set_skips_blank_names_and_dedups() {
        let set: PermissionSet = ["view_users", " VIEW_USERS", "", "edit_users"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.sorted(), vec!["EDIT_USERS", "VIEW_USERS"]);
    }

    #[test]
    fn test_allows_without_requirement() {
        let empty = PermissionSet::new();
        assert!(empty.allows(None));
        assert!(empty.allows(Some("  ")));
        assert!(!empty.allows(Some("VIEW_USERS")));
    }

    #[test]
    fn test_allows_compares_normalized() {
        let set: PermissionSet = ["view_users"].into_iter().collect();
        assert!(set.allows(Some(" View_Users ")));
        assert!(set.contains("VIEW_USERS"));
        assert!(!set.allows(Some("EDIT_USERS")));
    }

    #[test]
    fn test_permission_accepts_numeric_id() {
        let p: Permission =
            serde_json::from_str(r#"{"id": 101, "name": "view_users", "category": "Users"}"#)
                .unwrap();
        assert_eq!(p.id.as_deref(), Some("101"));
        assert_eq!(p.category.as_deref(), Some("Users"));
    }

    #[test]
    fn test_null_or_missing_name_is_blank() {
        let list: Vec<Permission> = serde_json::from_str(
            r#"[{"id": 1, "name": "view_transactions"}, {"id": 2, "name": null}, {"id": 3}]"#,
        )
        .unwrap();
        let set: PermissionSet = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(set.sorted(), vec!["VIEW_TRANSACTIONS"]);
    }
}
