//! Merchant Business Types

use serde::{Deserialize, Serialize};

/// Business (tenant) owned by a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Business {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub business_id: String,
    pub business_name: String,
    #[serde(default)]
    pub business_email: Option<String>,
    #[serde(default)]
    pub business_phone_number: Option<String>,
    #[serde(default)]
    pub business_address: Option<String>,
    #[serde(default)]
    pub business_website: Option<String>,
    #[serde(default)]
    pub business_logo: Option<String>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub is_church: bool,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default, deserialize_with = "crate::types::id::deserialize_opt")]
    pub merchant_id: Option<String>,
}

/// Header branding for a microfinance user's own institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantProfile {
    pub name: String,
    pub logo_url: Option<String>,
}
