//! FAQs (read-only)

use zw_common::FaqItem;

use super::{Resource, Scope};
use crate::error::ApiError;

impl Resource for FaqItem {
    type Dto = Self;
    const NAME: &'static str = "faqs";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/faqs".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto
    }

    fn id(&self) -> &str {
        &self.faq_id
    }
}
