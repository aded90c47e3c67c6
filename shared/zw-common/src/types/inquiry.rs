//! Contact Inquiry Types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    #[default]
    New,
    Pending,
    Resolved,
    Spam,
}

impl InquiryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Pending => "PENDING",
            Self::Resolved => "RESOLVED",
            Self::Spam => "SPAM",
        }
    }
}

impl FromStr for InquiryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "PENDING" => Ok(Self::Pending),
            "RESOLVED" => Ok(Self::Resolved),
            "SPAM" => Ok(Self::Spam),
            _ => Err(Error::UnknownVariant {
                kind: "inquiry status",
                value: s.to_string(),
            }),
        }
    }
}

/// Message received through the public contact form or by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ContactInquiry {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_deserializes() {
        let inquiry: ContactInquiry = serde_json::from_str(
            r#"{"id": "inq-202", "name": "Creative Corp.", "email": "hr@corp-creative.com",
                "phone": "555-123-4567", "subject": "Rates", "message": "Rate card?",
                "status": "PENDING", "source": "WEBSITE_FORM",
                "receivedAt": "2025-10-30T15:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(inquiry.status, InquiryStatus::Pending);
        assert_eq!(inquiry.received_at.as_deref(), Some("2025-10-30T15:30:00Z"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("spam".parse::<InquiryStatus>().unwrap(), InquiryStatus::Spam);
        assert!("closed".parse::<InquiryStatus>().is_err());
    }
}
