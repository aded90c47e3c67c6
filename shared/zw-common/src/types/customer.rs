//! Customer Types

use serde::Serialize;

/// End customer of a microfinance institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub role_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
