//! Transaction Types

use serde::Serialize;

/// Microfinance institution a transaction was made through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionTenant {
    pub id: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub merchant_id: Option<String>,
}

/// Remittance transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub tx_ref: String,
    pub amount: f64,
    pub payment_method: String,
    pub status: String,
    pub transaction_type: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub tenant: Option<TransactionTenant>,
    pub metadata: Option<serde_json::Value>,
}

impl Transaction {
    /// Display name of the institution, if any.
    #[must_use]
    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant.as_ref().map(|t| t.name.as_str())
    }
}
