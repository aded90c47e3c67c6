//! Common Error Types

use thiserror::Error;

/// Errors raised by shared domain logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A form field failed client-side validation. Nothing was sent.
    #[error("{message}")]
    Validation {
        /// Form field the message belongs to.
        field: &'static str,
        /// Human-readable message shown next to the field.
        message: String,
    },

    /// A string did not name any known variant.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        /// What was being parsed (e.g. "asset type").
        kind: &'static str,
        /// The offending input.
        value: String,
    },
}

impl Error {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Field name when this is a validation error.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::UnknownVariant { .. } => None,
        }
    }
}

/// Result alias for shared domain logic.
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with a validation error when `value` is blank.
pub fn require(field: &'static str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, message));
    }
    Ok(())
}
