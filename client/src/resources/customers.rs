//! Customers

use serde::Deserialize;
use zw_common::types::id;
use zw_common::Customer;

use super::{Resource, Scope};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default, deserialize_with = "id::deserialize_opt")]
    client_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: Option<RoleDto>,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct RoleDto {
    name: String,
}

impl From<CustomerDto> for Customer {
    fn from(c: CustomerDto) -> Self {
        Self {
            id: c.id,
            client_id: c.client_id.unwrap_or_default(),
            name: c.name,
            phone_number: c.phone_number,
            email: c.email,
            role_name: c.role.map(|r| r.name),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl Resource for Customer {
    type Dto = CustomerDto;
    const NAME: &'static str = "customers";

    fn list_path(scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some(match scope.tenant()? {
            Some(user_id) => format!("/customers/microfinance/{user_id}"),
            None => "/customers/all".to_string(),
        }))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into()
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zw_common::Role;

    #[test]
    fn test_microfinance_user_gets_scoped_endpoint() {
        let scope = Scope {
            user_id: Some("58".into()),
            role: Some(Role::Microfinance),
            ..Scope::default()
        };
        assert_eq!(
            Customer::list_path(&scope).unwrap().as_deref(),
            Some("/customers/microfinance/58")
        );
    }

    #[test]
    fn test_microfinance_user_without_id_is_an_error() {
        let scope = Scope {
            role: Some(Role::Microfinance),
            ..Scope::default()
        };
        assert!(matches!(
            Customer::list_path(&scope),
            Err(ApiError::MissingSessionField("user id"))
        ));
    }

    #[test]
    fn test_dto_mapping() {
        let dto: CustomerDto = serde_json::from_str(
            r#"{"id": 12, "clientId": "CL-12", "name": "Sara", "phoneNumber": "0911",
                "email": "sara@example.com", "createdAt": "2025-09-01", "updatedAt": "2025-09-02",
                "role": {"name": "ROLE_CUSTOMER"}}"#,
        )
        .unwrap();
        let customer = Customer::from_dto(dto);
        assert_eq!(customer.id, "12");
        assert_eq!(customer.role_name.as_deref(), Some("ROLE_CUSTOMER"));
    }
}
