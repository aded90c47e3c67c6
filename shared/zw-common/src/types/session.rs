//! Session Types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token issued on sign-in.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Dashboard role as issued by the backend (`ROLE_*`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Platform administrator: sees every tenant.
    Admin,
    /// Microfinance institution user: sees only its own tenant.
    Microfinance,
    /// Any other backend role, kept verbatim.
    Other(String),
}

impl Role {
    pub const ADMIN: &'static str = "ROLE_ADMIN";
    pub const MICROFINANCE: &'static str = "ROLE_MICROFINANCE";

    /// Parse a backend role name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            Self::ADMIN => Self::Admin,
            Self::MICROFINANCE => Self::Microfinance,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::Microfinance => Self::MICROFINANCE,
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub const fn is_microfinance(&self) -> bool {
        matches!(self, Self::Microfinance)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// Human-friendly role label: `ROLE_SUPER_ADMIN` -> `SUPER ADMIN`.
#[must_use]
pub fn role_label(name: &str) -> String {
    name.strip_prefix("ROLE_").unwrap_or(name).replace('_', " ")
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: AccessToken,
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub role_id: Option<String>,
}
