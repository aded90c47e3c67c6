//! Subaccount Types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settlement bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub id: String,
    pub name: String,
}

/// Merchant subaccount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subaccount {
    pub id: String,
    pub account_number: String,
    pub account_name: String,
    pub currency: String,
    pub balance: Option<f64>,
    pub merchant_id: Option<String>,
    pub bank_name: String,
    pub bank_id: String,
}

/// Subaccount create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubaccountForm {
    pub account_name: String,
    pub account_number: String,
    pub currency: String,
    pub bank_id: String,
}

impl Default for SubaccountForm {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            account_number: String::new(),
            currency: "ETB".to_string(),
            bank_id: String::new(),
        }
    }
}

impl SubaccountForm {
    /// Blank form preselecting the first listed bank.
    #[must_use]
    pub fn with_banks(banks: &[Bank]) -> Self {
        Self {
            bank_id: banks.first().map(|b| b.id.clone()).unwrap_or_default(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_record(sub: &Subaccount) -> Self {
        Self {
            account_name: sub.account_name.clone(),
            account_number: sub.account_number.clone(),
            currency: sub.currency.clone(),
            bank_id: sub.bank_id.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("accountName", &self.account_name),
            ("accountNumber", &self.account_number),
            ("currency", &self.currency),
            ("bankId", &self.bank_id),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        match missing {
            Some((field, _)) => Err(Error::validation(field, "All fields are required.")),
            None => Ok(()),
        }
    }
}

/// Second step of a subaccount transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    /// Amount as typed.
    pub amount: String,
    pub otp: String,
}

impl TransferForm {
    /// Validate and return the parsed amount.
    pub fn validate(&self) -> Result<f64> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| Error::validation("amount", "Please enter a valid amount."))?;
        if self.otp.trim().is_empty() {
            return Err(Error::validation(
                "otp",
                "Please enter the OTP sent to your phone.",
            ));
        }
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_every_field() {
        let form = SubaccountForm {
            account_name: "Ops".into(),
            account_number: "1000".into(),
            ..SubaccountForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field(), Some("bankId"));
        assert_eq!(err.to_string(), "All fields are required.");
    }

    #[test]
    fn test_with_banks_preselects_first() {
        let banks = vec![
            Bank { id: "b1".into(), name: "CBE".into() },
            Bank { id: "b2".into(), name: "Awash".into() },
        ];
        let form = SubaccountForm::with_banks(&banks);
        assert_eq!(form.bank_id, "b1");
        assert_eq!(form.currency, "ETB");
    }

    #[test]
    fn test_transfer_amount_must_be_positive() {
        for amount in ["", "0", "-5", "abc"] {
            let form = TransferForm { amount: amount.into(), otp: "123456".into() };
            assert_eq!(form.validate().unwrap_err().field(), Some("amount"));
        }
    }

    #[test]
    fn test_transfer_requires_otp() {
        let form = TransferForm { amount: "12.50".into(), otp: " ".into() };
        assert_eq!(form.validate().unwrap_err().field(), Some("otp"));

        let form = TransferForm { amount: "12.50".into(), otp: "654321".into() };
        assert!((form.validate().unwrap() - 12.5).abs() < f64::EPSILON);
    }
}
