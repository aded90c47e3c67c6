//! Compliance Records

use reqwest::Method;
use zw_common::{Compliance, Error as DomainError};

use super::{Request, Resource, Scope};
use crate::error::ApiError;
use crate::network::with_query;

impl Resource for Compliance {
    type Dto = Self;
    const NAME: &'static str = "compliance records";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/compliance".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto
    }

    fn id(&self) -> &str {
        &self.binfo_id
    }
}

/// Approve a business's compliance submission on behalf of the signed-in user.
pub fn approve_request(record: &Compliance, scope: &Scope) -> Result<Request, ApiError> {
    let business_id = record.business_id().ok_or_else(|| {
        DomainError::validation("businessId", "Compliance record has no business id.")
    })?;
    let path = with_query(
        &format!("/compliance/{business_id}/approve"),
        &[("approvedBy", scope.user_id()?)],
    );
    Ok(Request::new(Method::POST, path, None))
}
