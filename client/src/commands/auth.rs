//! Authentication Commands

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};
use zw_common::types::id;
use zw_common::{AccessToken, Role, Session};

use crate::error::ApiError;
use crate::network::{ApiClient, Payload};

/// Sign-in response payload (inside the `data` envelope).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    token: String,
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default, deserialize_with = "id::deserialize_opt")]
    role_id: Option<String>,
}

impl From<SignInResponse> for Session {
    fn from(r: SignInResponse) -> Self {
        Self {
            token: AccessToken::new(r.token),
            user_id: r.id,
            display_name: r.display_name,
            email: r.email,
            role: r.role,
            role_id: r.role_id,
        }
    }
}

/// OTP sign-in response payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpResponse {
    token: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(deserialize_with = "id::deserialize")]
    user_id: String,
}

impl From<OtpResponse> for Session {
    fn from(r: OtpResponse) -> Self {
        Self {
            token: AccessToken::new(r.token),
            display_name: r.email.clone().unwrap_or_default(),
            user_id: r.user_id,
            email: r.email,
            role: None,
            role_id: None,
        }
    }
}

/// Sign in with email (or phone number) and password.
pub async fn sign_in(
    api: &ApiClient,
    email_or_phone: &str,
    password: &str,
) -> Result<Session, ApiError> {
    info!("Attempting sign-in for {}", email_or_phone);

    let response: SignInResponse = api
        .post(
            "/auth/admin/signin",
            &json!({
                "emailOrPhoneNumber": email_or_phone.trim(),
                "password": password,
            }),
        )
        .await
        .map_err(|e| match e {
            ApiError::Unauthorized { status: 401, .. } => ApiError::InvalidCredentials,
            other => other,
        })?;

    let session: Session = response.into();
    api.session().set(session.clone()).await?;
    info!("Signed in as {}", session.display_name);
    Ok(session)
}

/// Complete an OTP sign-in.
pub async fn verify_otp(api: &ApiClient, email: &str, otp: &str) -> Result<Session, ApiError> {
    let response: OtpResponse = api
        .post(
            "/auth/verify-otp-signin",
            &json!({ "email": email.trim(), "otp": otp.trim() }),
        )
        .await?;

    let session: Session = response.into();
    api.session().set(session.clone()).await?;
    info!("OTP verified for {}", email);
    Ok(session)
}

/// Ask the backend to email a password reset OTP.
pub async fn forgot_password(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    api.execute(
        Method::POST,
        "/auth/forgot-password",
        Some(Payload::json(&json!({ "email": email.trim() }))?),
    )
    .await
    .map_err(|e| {
        error!("Password reset request failed: {}", e);
        e
    })?;
    debug!("Password reset OTP requested for {}", email);
    Ok(())
}

pub async fn reset_password(
    api: &ApiClient,
    email: &str,
    token: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    api.execute(
        Method::POST,
        "/auth/reset-password",
        Some(Payload::json(&json!({
            "email": email.trim(),
            "token": token.trim(),
            "newPassword": new_password,
        }))?),
    )
    .await?;
    info!("Password updated for {}", email);
    Ok(())
}

/// Forget the stored session. There is no server-side sign-out.
pub async fn sign_out(api: &ApiClient) -> Result<(), ApiError> {
    api.session().clear().await?;
    info!("Signed out");
    Ok(())
}
