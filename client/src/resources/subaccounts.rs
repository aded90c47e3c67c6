//! Merchant Subaccounts
//!
//! Only listed in live mode, for the selected business. Transfers are a
//! two-step OTP exchange.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use zw_common::types::id;
use zw_common::{Bank, Subaccount, SubaccountForm, TransferForm};

use super::{Deletable, Editable, Request, Resource, Scope};
use crate::error::ApiError;
use crate::network::ApiClient;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default)]
    account_number: String,
    #[serde(default)]
    account_name: String,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    balance: Option<f64>,
    #[serde(default, alias = "businessId", deserialize_with = "id::deserialize_opt")]
    merchant_id: Option<String>,
    #[serde(default)]
    bank: Option<Bank>,
}

impl From<SubaccountDto> for Subaccount {
    fn from(s: SubaccountDto) -> Self {
        let (bank_id, bank_name) = s.bank.map(|b| (b.id, b.name)).unwrap_or_default();
        Self {
            id: s.id,
            account_number: s.account_number,
            account_name: s.account_name,
            currency: s.currency,
            balance: s.balance,
            merchant_id: s.merchant_id,
            bank_name,
            bank_id,
        }
    }
}

fn subaccount_body(form: &SubaccountForm) -> serde_json::Value {
    json!({
        "accountName": form.account_name.trim(),
        "accountNumber": form.account_number.trim(),
        "currency": form.currency.trim(),
        "bankId": form.bank_id,
    })
}

impl Resource for Subaccount {
    type Dto = SubaccountDto;
    const NAME: &'static str = "subaccounts";

    fn list_path(scope: &Scope) -> Result<Option<String>, ApiError> {
        if !scope.live_mode {
            return Ok(None);
        }
        Ok(Some(format!("/subaccounts/merchant/{}", scope.business_id()?)))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into()
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Subaccount {
    type Form = SubaccountForm;

    fn create_request(form: &Self::Form, scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        let mut body = subaccount_body(form);
        body["businessId"] = json!(scope.business_id()?);
        body["reference"] = json!("InitialSetup");
        Request::json(Method::POST, "/subaccounts", &body)
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(
            Method::PUT,
            format!("/subaccounts/{}", record.id),
            &subaccount_body(form),
        )
    }
}

impl Deletable for Subaccount {
    fn delete_path(record: &Self) -> String {
        format!("/subaccounts/{}", record.id)
    }
}

/// Settlement banks for the subaccount form.
pub async fn list_banks(api: &ApiClient) -> Result<Vec<Bank>, ApiError> {
    let banks: Vec<Bank> = api.get_list("/banks").await?;
    debug!("Fetched {} banks", banks.len());
    Ok(banks)
}

/// First transfer step: have the backend text an OTP to the account owner.
pub fn send_transfer_otp_request(subaccount: &Subaccount) -> Result<Request, ApiError> {
    Request::json(
        Method::POST,
        "/subaccounts/transfer/send-otp",
        &json!({ "subaccountId": subaccount.id }),
    )
}

/// Second transfer step: amount plus the OTP.
pub fn verify_transfer_request(subaccount: &Subaccount, form: &TransferForm) -> Result<Request, ApiError> {
    form.validate()?;
    Request::json(
        Method::POST,
        "/subaccounts/transfer/verify-otp",
        &json!({
            "subaccountId": subaccount.id,
            "amount": form.amount.trim(),
            "otp": form.otp.trim(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Payload;

    fn body(request: &Request) -> serde_json::Value {
        match &request.payload {
            Some(Payload::Json(value)) => value.clone(),
            other => panic!("expected JSON payload, got {other:?}"),
        }
    }

    fn form() -> SubaccountForm {
        SubaccountForm {
            account_name: "Operations".into(),
            account_number: "1000123".into(),
            currency: "ETB".into(),
            bank_id: "b-1".into(),
        }
    }

    #[test]
    fn test_not_listed_in_test_mode() {
        let scope = Scope {
            business_id: Some("31".into()),
            ..Scope::default()
        };
        assert_eq!(Subaccount::list_path(&scope).unwrap(), None);
    }

    #[test]
    fn test_live_mode_lists_by_business() {
        let scope = Scope {
            business_id: Some("31".into()),
            live_mode: true,
            ..Scope::default()
        };
        assert_eq!(
            Subaccount::list_path(&scope).unwrap().as_deref(),
            Some("/subaccounts/merchant/31")
        );
    }

    #[test]
    fn test_create_adds_business_and_reference() {
        let scope = Scope {
            business_id: Some("31".into()),
            ..Scope::default()
        };
        let request = Subaccount::create_request(&form(), &scope).unwrap();
        let body = body(&request);
        assert_eq!(body["businessId"], "31");
        assert_eq!(body["reference"], "InitialSetup");
        assert_eq!(body["bankId"], "b-1");
    }

    #[test]
    fn test_dto_flattens_bank() {
        let dto: SubaccountDto = serde_json::from_str(
            r#"{"id": 9, "accountNumber": "1000", "accountName": "Ops", "currency": "ETB",
                "balance": 250.0, "bank": {"id": 3, "name": "CBE"}}"#,
        )
        .unwrap();
        let sub = Subaccount::from_dto(dto);
        assert_eq!(sub.bank_name, "CBE");
        assert_eq!(sub.bank_id, "3");
    }

    #[test]
    fn test_verify_transfer_validates_first() {
        let sub = Subaccount::from_dto(
            serde_json::from_str(r#"{"id": "s-1"}"#).unwrap(),
        );
        let bad = TransferForm {
            amount: "0".into(),
            otp: "123456".into(),
        };
        assert!(verify_transfer_request(&sub, &bad).is_err());

        let good = TransferForm {
            amount: "75.5".into(),
            otp: "123456".into(),
        };
        let request = verify_transfer_request(&sub, &good).unwrap();
        assert_eq!(body(&request)["amount"], "75.5");
    }
}
