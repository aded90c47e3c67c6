//! Portfolio Asset Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::attachment::Attachment;
use crate::error::{Error, Result};

/// Portfolio asset category. The backend stores these lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetType {
    /// Video and film work. Content is an external link.
    #[default]
    Media,
    /// Art and design. Content is the thumbnail itself.
    Art,
    /// Voice-over recordings. Content is an uploaded audio file.
    Voiceover,
}

impl AssetType {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Media, Self::Art, Self::Voiceover]
    }

    /// Backend value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Art => "art",
            Self::Voiceover => "voiceover",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Media => "Media Production",
            Self::Art => "Art/Design",
            Self::Voiceover => "Voice-Overs",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "media" => Ok(Self::Media),
            "art" => Ok(Self::Art),
            "voiceover" => Ok(Self::Voiceover),
            _ => Err(Error::UnknownVariant {
                kind: "asset type",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for AssetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Portfolio asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioAsset {
    pub id: String,
    pub title: String,
    pub description: String,
    pub asset_type: AssetType,
    /// Main content link (media page, art link or audio file URL).
    pub url: String,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: Option<String>,
}

/// Portfolio asset create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetForm {
    pub title: String,
    pub description: String,
    pub asset_type: AssetType,
    /// Link input. Only shown for media assets.
    pub link_url: Option<String>,
    pub thumbnail: Option<Attachment>,
    pub audio_file: Option<Attachment>,
    pub is_featured: bool,
    pub is_active: bool,
}

impl Default for AssetForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            asset_type: AssetType::Media,
            link_url: None,
            thumbnail: None,
            audio_file: None,
            is_featured: false,
            is_active: true,
        }
    }
}

impl AssetForm {
    /// Prefill from an existing asset. Files are never prefilled.
    #[must_use]
    pub fn from_record(asset: &PortfolioAsset) -> Self {
        Self {
            title: asset.title.clone(),
            description: asset.description.clone(),
            asset_type: asset.asset_type,
            link_url: Some(asset.url.clone()).filter(|u| !u.is_empty()),
            thumbnail: None,
            audio_file: None,
            is_featured: asset.is_featured,
            is_active: asset.is_active,
        }
    }

    /// Link input with surrounding whitespace removed; blank counts as absent.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link_url
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}
