//! FAQ Types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct FaqItem {
    #[serde(alias = "id", deserialize_with = "crate::types::id::deserialize")]
    pub faq_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
