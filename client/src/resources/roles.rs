//! Roles and Permissions

use reqwest::Method;
use serde_json::json;
use zw_common::{PermissionSelection, RoleDefinition};

use super::{Editable, Request, Resource, Scope};
use crate::error::ApiError;

impl Resource for RoleDefinition {
    type Dto = Self;
    const NAME: &'static str = "roles";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/roles".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for RoleDefinition {
    type Form = PermissionSelection;

    fn update_request(record: &Self, selection: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        Request::json(
            Method::PUT,
            format!("/roles/{}/permissions", record.id),
            &json!({ "permissions": selection.selected() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Payload;
    use zw_common::types::role::permission_catalogue;

    #[test]
    fn test_update_sends_sorted_selection() {
        let role: RoleDefinition = serde_json::from_str(
            r#"{"id": 2, "name": "ROLE_EDITOR", "permissions": [{"name": "manage_blog"}]}"#,
        )
        .unwrap();
        let mut selection = PermissionSelection::new(permission_catalogue(), &role);
        selection.toggle_single("VIEW_INQUIRIES", true);

        let request = RoleDefinition::update_request(&role, &selection, &Scope::default()).unwrap();
        assert_eq!(request.path, "/roles/2/permissions");
        let Some(Payload::Json(body)) = request.payload else {
            panic!("expected JSON payload");
        };
        assert_eq!(body["permissions"], json!(["MANAGE_BLOG", "VIEW_INQUIRIES"]));
    }
}
