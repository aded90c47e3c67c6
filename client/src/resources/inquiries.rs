//! Contact Inquiries
//!
//! Read and triaged only: the one mutation is a status change.

use reqwest::Method;
use serde_json::json;
use zw_common::{ContactInquiry, InquiryStatus};

use super::{Editable, Request, Resource, Scope};
use crate::error::ApiError;

impl Resource for ContactInquiry {
    type Dto = Self;
    const NAME: &'static str = "inquiries";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/inquiries".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for ContactInquiry {
    type Form = InquiryStatus;

    fn update_request(record: &Self, status: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        Request::json(
            Method::PATCH,
            format!("/inquiries/{}/status", record.id),
            &json!({ "status": status.as_str() }),
        )
    }
}

/// Inquiries in `status`, for the status tabs.
#[must_use]
pub fn with_status(inquiries: &[ContactInquiry], status: InquiryStatus) -> Vec<&ContactInquiry> {
    inquiries.iter().filter(|i| i.status == status).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_unsupported() {
        assert!(matches!(
            ContactInquiry::create_request(&InquiryStatus::New, &Scope::default()),
            Err(ApiError::Unsupported("create"))
        ));
    }

    #[test]
    fn test_status_tabs() {
        let inquiries: Vec<ContactInquiry> = serde_json::from_str(
            r#"[{"id": "inq-201", "name": "Alex", "email": "a@example.com", "status": "NEW"},
                {"id": "inq-203", "name": "Bot", "email": "b@spam.example", "status": "SPAM"}]"#,
        )
        .unwrap();
        let spam = with_status(&inquiries, InquiryStatus::Spam);
        assert_eq!(spam.len(), 1);
        assert_eq!(spam[0].id, "inq-203");
    }
}
