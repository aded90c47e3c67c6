//! Microfinance Institution Types

use std::str::FromStr;

use serde::Serialize;

use super::attachment::Attachment;
use crate::error::{require, Error, Result};

/// Registration status of an institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MicrofinanceStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for MicrofinanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(Error::UnknownVariant {
                kind: "microfinance status",
                value: s.to_string(),
            }),
        }
    }
}

/// Registered microfinance institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Microfinance {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub license_number: String,
    pub address: String,
    pub owner_name: String,
    pub tin_number: String,
    pub description: String,
    pub status: Option<MicrofinanceStatus>,
    pub is_active: bool,
    pub registration_date: Option<String>,
    pub account_balance: f64,
    pub merchant_id: String,
    pub secret_hash: String,
    pub logo_url: Option<String>,
    /// Login email of the institution's user account.
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Microfinance create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicrofinanceForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub license_number: String,
    pub address: String,
    pub owner_name: String,
    pub tin_number: String,
    pub description: String,
    pub merchant_id: String,
    pub secret_hash: String,
    pub logo: Option<Attachment>,
}

impl MicrofinanceForm {
    /// Prefill from an existing record.
    #[must_use]
    pub fn from_record(record: &Microfinance) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone().unwrap_or_default(),
            phone_number: record.phone_number.clone(),
            license_number: record.license_number.clone(),
            address: record.address.clone(),
            owner_name: record.owner_name.clone(),
            tin_number: record.tin_number.clone(),
            description: record.description.clone(),
            merchant_id: record.merchant_id.clone(),
            secret_hash: record.secret_hash.clone(),
            logo: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        const MESSAGE: &str =
            "Required fields (Name, Phone, License, Address, Owner, TIN) must be filled.";
        require("name", &self.name, MESSAGE)?;
        require("phone_number", &self.phone_number, MESSAGE)?;
        require("license_number", &self.license_number, MESSAGE)?;
        require("address", &self.address, MESSAGE)?;
        require("owner_name", &self.owner_name, MESSAGE)?;
        require("tin_number", &self.tin_number, MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MicrofinanceForm {
        MicrofinanceForm {
            name: "Abay MFI".into(),
            phone_number: "+251911000000".into(),
            license_number: "LIC12345".into(),
            address: "Bole, Addis Ababa".into(),
            owner_name: "Hanna T.".into(),
            tin_number: "000-000-000".into(),
            ..MicrofinanceForm::default()
        }
    }

    #[test]
    fn test_validate_accepts_required_fields_only() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let form = MicrofinanceForm {
            license_number: String::new(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err().field(), Some("license_number"));
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "approved".parse::<MicrofinanceStatus>().unwrap(),
            MicrofinanceStatus::Approved
        );
        assert!("unknown".parse::<MicrofinanceStatus>().is_err());
    }
}
