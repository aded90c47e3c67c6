//! Microfinance Institutions
//!
//! Registered and updated through multipart forms so a logo can ride along.

use chrono::Local;
use reqwest::Method;
use serde::Deserialize;
use zw_common::types::id;
use zw_common::{Microfinance, MicrofinanceForm, MicrofinanceStatus};

use super::{Deletable, Editable, Request, Resource, Scope};
use crate::error::ApiError;
use crate::network::{FormPart, Payload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrofinanceDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    license_number: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    owner_name: String,
    #[serde(default)]
    tin_number: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    registration_date: Option<String>,
    #[serde(default)]
    account_balance: Option<f64>,
    #[serde(default, deserialize_with = "id::deserialize_opt")]
    merchant_id: Option<String>,
    #[serde(default)]
    secret_hash: Option<String>,
    #[serde(default, alias = "logo")]
    logo_url: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user: Option<UserDto>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[serde(default)]
    email: Option<String>,
}

impl From<MicrofinanceDto> for Microfinance {
    fn from(m: MicrofinanceDto) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone_number: m.phone_number,
            license_number: m.license_number,
            address: m.address,
            owner_name: m.owner_name,
            tin_number: m.tin_number,
            description: m.description.unwrap_or_default(),
            status: m.status.and_then(|s| s.parse::<MicrofinanceStatus>().ok()),
            is_active: m.is_active,
            registration_date: m.registration_date,
            account_balance: m.account_balance.unwrap_or_default(),
            merchant_id: m.merchant_id.unwrap_or_default(),
            secret_hash: m.secret_hash.unwrap_or_default(),
            logo_url: m.logo_url,
            // The email lives on the linked user account; older payloads carry it flat.
            email: m.user.and_then(|u| u.email).or(m.email),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn multipart(form: &MicrofinanceForm) -> Payload {
    let mut parts = vec![
        FormPart::text("name", form.name.trim()),
        FormPart::text("phoneNumber", form.phone_number.trim()),
        FormPart::text("email", form.email.trim()),
        FormPart::text("licenseNumber", form.license_number.trim()),
        FormPart::text("address", form.address.trim()),
        FormPart::text("ownerName", form.owner_name.trim()),
        FormPart::text("tinNumber", form.tin_number.trim()),
        FormPart::text(
            "registrationDate",
            Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        ),
        FormPart::text("description", form.description.as_str()),
        FormPart::text("merchantId", form.merchant_id.trim()),
        FormPart::text("secretHash", form.secret_hash.as_str()),
        FormPart::text("accountBalance", "0"),
        FormPart::text("microTypeName", "MICROFINANCE"),
    ];
    if let Some(logo) = zw_common::types::attachment::non_empty(form.logo.as_ref()) {
        parts.push(FormPart::file("logo", logo));
    }
    Payload::Multipart(parts)
}

impl Resource for Microfinance {
    type Dto = MicrofinanceDto;
    const NAME: &'static str = "microfinances";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/microfinances".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into()
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for Microfinance {
    type Form = MicrofinanceForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Ok(Request::new(
            Method::POST,
            "/admin/register-microfinance",
            Some(multipart(form)),
        ))
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Ok(Request::new(
            Method::PUT,
            format!("/admin/microfinances/{}", record.id),
            Some(multipart(form)),
        ))
    }
}

impl Deletable for Microfinance {
    fn delete_path(record: &Self) -> String {
        format!("/admin/microfinances/{}", record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zw_common::Attachment;

    fn form() -> MicrofinanceForm {
        MicrofinanceForm {
            name: "Abay MFI".into(),
            phone_number: "+251911000000".into(),
            license_number: "LIC-1".into(),
            address: "Bole".into(),
            owner_name: "Hanna".into(),
            tin_number: "0001".into(),
            ..MicrofinanceForm::default()
        }
    }

    fn part_names(request: &Request) -> Vec<String> {
        match &request.payload {
            Some(Payload::Multipart(parts)) => parts.iter().map(|p| p.name().to_string()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_create_request_is_multipart_with_defaults() {
        let request = Microfinance::create_request(&form(), &Scope::default()).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/admin/register-microfinance");
        let names = part_names(&request);
        assert!(names.contains(&"accountBalance".to_string()));
        assert!(names.contains(&"microTypeName".to_string()));
        assert!(!names.contains(&"logo".to_string()));
    }

    #[test]
    fn test_logo_attached_when_present() {
        let form = MicrofinanceForm {
            logo: Some(Attachment::new("logo.png", vec![0x89, 0x50])),
            ..form()
        };
        let request = Microfinance::create_request(&form, &Scope::default()).unwrap();
        assert!(part_names(&request).contains(&"logo".to_string()));
    }

    #[test]
    fn test_missing_required_field_sends_nothing() {
        let form = MicrofinanceForm {
            tin_number: " ".into(),
            ..form()
        };
        assert!(matches!(
            Microfinance::create_request(&form, &Scope::default()),
            Err(ApiError::Invalid(_))
        ));
    }

    #[test]
    fn test_dto_prefers_user_email() {
        let dto: MicrofinanceDto = serde_json::from_str(
            r#"{"id": 3, "name": "Abay", "status": "approved", "accountBalance": 12.5,
                "email": "flat@example.com", "user": {"email": "owner@example.com"}}"#,
        )
        .unwrap();
        let record = Microfinance::from_dto(dto);
        assert_eq!(record.email.as_deref(), Some("owner@example.com"));
        assert_eq!(record.status, Some(MicrofinanceStatus::Approved));
    }
}
