//! Compliance Types
//!
//! Business compliance submissions and the lookup tables their forms draw from
//! (industries, regional states, sub-cities, staff sizes, currencies).

use serde::{Deserialize, Serialize};

use crate::error::{require, Error, Result};

// ============================================================================
// Lookup Tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Industry {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub industry_id: String,
    pub industry_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Regional state (top-level administrative region).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct RegionalState {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub state_id: String,
    pub state_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct SubCity {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub sub_city_id: String,
    pub sub_city_name: String,
    #[serde(default)]
    pub state: Option<RegionalState>,
    #[serde(default, deserialize_with = "crate::types::id::deserialize_opt")]
    pub state_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SubCity {
    /// Owning state id, from the nested state or the flat field.
    #[must_use]
    pub fn owning_state_id(&self) -> Option<&str> {
        self.state
            .as_ref()
            .map(|s| s.state_id.as_str())
            .or(self.state_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct StaffSize {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub staff_size_id: String,
    pub staff_size_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TransactionVolume {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub trans_vol_id: String,
    pub transaction_volume_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Currency {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub id: String,
    pub code: String,
    pub name: String,
    pub symbol: String,
    #[serde(default, rename(deserialize = "default"))]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ============================================================================
// Compliance Submission
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct MerchantSummary {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub merchant_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct MerchantBusiness {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub business_id: String,
    pub business_name: String,
}

/// Compliance submission for a merchant business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Compliance {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub binfo_id: String,
    #[serde(default)]
    pub merchant: Option<MerchantSummary>,
    #[serde(default)]
    pub merchant_business: Option<MerchantBusiness>,
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub state: Option<RegionalState>,
    #[serde(default)]
    pub sub_city: Option<SubCity>,
    #[serde(default)]
    pub staff_size: Option<StaffSize>,
    #[serde(default)]
    pub transaction_volume: Option<TransactionVolume>,
    #[serde(default)]
    pub woreda: Option<i64>,
    #[serde(default)]
    pub legal_business_name: String,
    #[serde(default)]
    pub tin_number: String,
    #[serde(default)]
    pub vat_registered: bool,
    #[serde(default)]
    pub vat_no: Option<String>,
    #[serde(default)]
    pub vat_file: Option<String>,
    #[serde(default)]
    pub business_registration_no: Option<String>,
    #[serde(default)]
    pub trade_license_file: Option<String>,
    #[serde(default)]
    pub tin_certificate_file: Option<String>,
    #[serde(default)]
    pub business_address: Option<String>,
    #[serde(default)]
    pub house_no: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub church_registration_number: Option<String>,
    #[serde(default)]
    pub church_tax_exempt_number: Option<String>,
}

impl Compliance {
    /// Business id used by the approval endpoint.
    #[must_use]
    pub fn business_id(&self) -> Option<&str> {
        self.merchant_business
            .as_ref()
            .map(|b| b.business_id.as_str())
    }

    /// Attached documents as `(label, url)` pairs.
    #[must_use]
    pub fn documents(&self) -> Vec<(&'static str, &str)> {
        [
            ("Trade License", self.trade_license_file.as_deref()),
            ("TIN Certificate", self.tin_certificate_file.as_deref()),
            ("VAT Certificate", self.vat_file.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.filter(|u| !u.is_empty()).map(|u| (label, u)))
        .collect()
    }
}

// ============================================================================
// Lookup Forms
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndustryForm {
    pub industry_name: String,
}

impl IndustryForm {
    pub fn validate(&self) -> Result<()> {
        require("industry_name", &self.industry_name, "Industry name is required.")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionalStateForm {
    pub state_name: String,
}

impl RegionalStateForm {
    pub fn validate(&self) -> Result<()> {
        require("state_name", &self.state_name, "State name is required.")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubCityForm {
    pub sub_city_name: String,
    pub state_id: Option<String>,
}

impl SubCityForm {
    pub fn validate(&self) -> Result<()> {
        const MESSAGE: &str = "Sub-city name and state are required.";
        require("sub_city_name", &self.sub_city_name, MESSAGE)?;
        match self.state_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(Error::validation("state_id", MESSAGE)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffSizeForm {
    pub staff_size_name: String,
}

impl StaffSizeForm {
    pub fn validate(&self) -> Result<()> {
        require(
            "staff_size_name",
            &self.staff_size_name,
            "Staff size name is required.",
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyForm {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

impl CurrencyForm {
    pub fn validate(&self) -> Result<()> {
        const MESSAGE: &str = "All fields are required.";
        require("code", &self.code, MESSAGE)?;
        require("name", &self.name, MESSAGE)?;
        require("symbol", &self.symbol, MESSAGE)
    }
}
