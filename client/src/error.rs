//! Console Error Types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the console core.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No token in the session store.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Backend rejected the token (401/403).
    #[error("Unauthorized: {message}")]
    Unauthorized { status: u16, message: String },

    /// Sign-in was refused.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any other non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Connection failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("Session storage failed: {0}")]
    Storage(String),

    /// The session lacks a field this operation scopes by.
    #[error("Session has no {0}")]
    MissingSessionField(&'static str),

    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] zw_common::Error),

    #[error("No delete is awaiting confirmation")]
    NothingToConfirm,

    #[error("No dialog is open")]
    NoOpenDialog,

    #[error("Live API key not found. Please complete compliance.")]
    LiveModeUnavailable,

    /// The resource has no such operation.
    #[error("This resource does not support {0}")]
    Unsupported(&'static str),
}

impl ApiError {
    /// Build an error from a non-success response.
    ///
    /// The message comes from the JSON body's `message`, then `error`, then the status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                ["message", "error"].iter().find_map(|key| {
                    json.get(key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("Request failed: {status}"), str::to_string)
            });

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            Self::Unauthorized {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::Backend {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotAuthenticated)
    }

    /// HTTP status when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Storage(format!("Task join error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefers_message_field() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message": "License number already registered", "error": "Bad Request"}"#,
        );
        assert_eq!(err.to_string(), "License number already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_message_falls_back_to_error_then_reason() {
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"error": "Duplicate slug"}"#);
        assert_eq!(err.to_string(), "Duplicate slug");

        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_auth_statuses_map_to_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = ApiError::from_response(status, "");
            assert!(err.is_unauthorized(), "{status} should be unauthorized");
        }
        assert!(!ApiError::from_response(StatusCode::NOT_FOUND, "").is_unauthorized());
    }
}
