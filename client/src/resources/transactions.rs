//! Transactions
//!
//! Admins list every transaction; microfinance users only their own tenant's.

use serde::Deserialize;
use zw_common::types::id;
use zw_common::{Transaction, TransactionTenant};

use super::{Resource, Scope};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default)]
    tx_ref: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    payment_method: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    transaction_type: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    microfinance: Option<TenantDto>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    logo_url: Option<String>,
    #[serde(default, deserialize_with = "id::deserialize_opt")]
    merchant_id: Option<String>,
}

impl From<TenantDto> for TransactionTenant {
    fn from(t: TenantDto) -> Self {
        Self {
            id: t.id,
            name: t.name,
            phone_number: t.phone_number,
            email: t.email,
            logo_url: t.logo_url,
            merchant_id: t.merchant_id,
        }
    }
}

impl From<TransactionDto> for Transaction {
    fn from(t: TransactionDto) -> Self {
        Self {
            id: t.id,
            tx_ref: t.tx_ref,
            amount: t.amount,
            payment_method: t.payment_method,
            status: t.status,
            transaction_type: t.transaction_type,
            created_at: t.created_at,
            updated_at: t.updated_at,
            tenant: t.microfinance.map(Into::into),
            metadata: t.metadata.filter(|m| !m.is_null()),
        }
    }
}

impl Resource for Transaction {
    type Dto = TransactionDto;
    const NAME: &'static str = "transactions";

    fn list_path(scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some(match scope.tenant()? {
            Some(user_id) => format!("/transactions/microfinance/{user_id}"),
            None => "/transactions/all".to_string(),
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
    fn test_dto_maps_nested_tenant() {
        let dto: TransactionDto = serde_json::from_str(
            r#"{"id": 981, "txRef": "TX-981", "amount": 1500.5, "paymentMethod": "TELEBIRR",
                "status": "SUCCESS", "transactionType": "REMITTANCE",
                "createdAt": "2025-10-01T09:00:00", "metadata": null,
                "microfinance": {"id": 4, "name": "Abay MFI", "merchantId": 77}}"#,
        )
        .unwrap();
        let tx = Transaction::from_dto(dto);
        assert_eq!(tx.id, "981");
        assert_eq!(tx.tenant_name(), Some("Abay MFI"));
        assert_eq!(
            tx.tenant.as_ref().and_then(|t| t.merchant_id.as_deref()),
            Some("77")
        );
        assert!(tx.metadata.is_none());
    }

    #[test]
    fn test_list_path_by_role() {
        let admin = Scope {
            user_id: Some("1".into()),
            role: Some(Role::Admin),
            ..Scope::default()
        };
        assert_eq!(
            Transaction::list_path(&admin).unwrap().as_deref(),
            Some("/transactions/all")
        );

        let tenant = Scope {
            user_id: Some("31".into()),
            role: Some(Role::Microfinance),
            ..Scope::default()
        };
        assert_eq!(
            Transaction::list_path(&tenant).unwrap().as_deref(),
            Some("/transactions/microfinance/31")
        );
    }
}
