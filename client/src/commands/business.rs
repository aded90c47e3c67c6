//! Business Selection and Live Mode

use serde::Deserialize;
use tracing::{debug, info, warn};
use zw_common::{Business, TenantProfile};

use crate::error::ApiError;
use crate::network::{with_query, ApiClient};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LiveCheck {
    is_live: bool,
}

#[derive(Debug, Deserialize)]
struct TenantDto {
    #[serde(default)]
    name: String,
    #[serde(default)]
    logo: Option<String>,
}

impl From<TenantDto> for TenantProfile {
    fn from(t: TenantDto) -> Self {
        Self {
            name: t.name,
            logo_url: t.logo.filter(|l| !l.trim().is_empty()),
        }
    }
}

/// Businesses owned by the signed-in merchant.
pub async fn list_businesses(api: &ApiClient) -> Result<Vec<Business>, ApiError> {
    let merchant_id = api
        .session()
        .read()
        .await
        .user_id
        .ok_or(ApiError::MissingSessionField("user id"))?;

    let businesses: Vec<Business> = api
        .get_list(&format!("/merchant-business/merchant/{merchant_id}"))
        .await?;
    debug!("Fetched {} businesses", businesses.len());
    Ok(businesses)
}

/// Select the business later requests are scoped by. Drops back to test mode.
pub async fn use_business(api: &ApiClient, business_id: &str) -> Result<(), ApiError> {
    let business_id = business_id.trim();
    if business_id.is_empty() {
        return Err(ApiError::MissingSessionField("business id"));
    }
    let store = api.session();
    store.set_business_id(Some(business_id.to_string())).await?;
    store.set_live_mode(false).await?;
    info!("Selected business {}", business_id);
    Ok(())
}

/// Switch between live and test mode for the selected business.
///
/// Going live asks the backend whether the business holds a live key.
/// Going back to test mode is local.
pub async fn set_live_mode(api: &ApiClient, live: bool) -> Result<(), ApiError> {
    let store = api.session();
    let business_id = store
        .read()
        .await
        .business_id
        .ok_or(ApiError::MissingSessionField("business id"))?;

    if !live {
        store.set_live_mode(false).await?;
        info!("Switched to test mode");
        return Ok(());
    }

    let path = with_query(&format!("/merchant/business/{business_id}"), &[("isLive", "true")]);
    let check = match api.get::<LiveCheck>(&path).await {
        Ok(check) => check,
        Err(e) => {
            warn!("Live key check failed for business {}: {}", business_id, e);
            return Err(ApiError::LiveModeUnavailable);
        }
    };

    if !check.is_live {
        warn!("Business {} has no live key", business_id);
        return Err(ApiError::LiveModeUnavailable);
    }

    store.set_live_mode(true).await?;
    info!("Switched to live mode");
    Ok(())
}

/// Header branding for microfinance users. `None` for every other role.
pub async fn tenant_profile(api: &ApiClient) -> Result<Option<TenantProfile>, ApiError> {
    let stored = api.session().read().await;
    let Some(user_id) = stored
        .role
        .as_ref()
        .filter(|role| role.is_microfinance())
        .and(stored.user_id.as_deref())
    else {
        return Ok(None);
    };

    let tenant: TenantDto = api.get(&format!("/microfinances/{user_id}")).await?;
    Ok(Some(tenant.into()))
}
