//! Portfolio Assets
//!
//! Listed per asset type. Create and edit send a multipart body: optional
//! `thumbnail` and `audioFile` files plus a `data` part holding JSON.
//!
//! Main content by type:
//! - media: a link, required.
//! - art: no link input; a placeholder link is sent when none is given.
//! - voiceover: an uploaded audio file, required on create.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use zw_common::types::attachment::non_empty;
use zw_common::types::id;
use zw_common::{AssetForm, AssetType, Error as DomainError, PortfolioAsset};

use super::{Deletable, Editable, Request, Resource, Scope};
use crate::error::ApiError;
use crate::network::{FormPart, Payload};

/// Sent for art assets created without a link.
pub const ART_PLACEHOLDER_LINK: &str = "https://placeholder-url.com/art-link";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetailsDto {
    is_featured: Option<bool>,
    is_active: Option<bool>,
    tags: Option<Vec<String>>,
}

/// The backend mixes camelCase and snake_case keys; both spellings are read
/// as separate fields so a payload carrying both still parses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioAssetDto {
    #[serde(deserialize_with = "id::deserialize")]
    id: String,
    title: String,
    description: Option<String>,
    asset_type: Option<String>,
    #[serde(rename = "assetType")]
    asset_type_camel: Option<String>,
    url: Option<String>,
    link_url: Option<String>,
    link: Option<String>,
    thumbnail_url: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url_camel: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(rename = "isFeatured")]
    is_featured: Option<bool>,
    #[serde(rename = "isActive")]
    is_active: Option<bool>,
    details: Option<DetailsDto>,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

fn first_present(candidates: [Option<String>; 3]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

fn parse_asset_type(raw: Option<String>) -> AssetType {
    let Some(raw) = raw else {
        return AssetType::default();
    };
    raw.parse().unwrap_or_else(|e| {
        warn!("Unrecognized asset type, treating as media: {}", e);
        AssetType::default()
    })
}

impl From<PortfolioAssetDto> for PortfolioAsset {
    fn from(a: PortfolioAssetDto) -> Self {
        let details = a.details.unwrap_or_default();
        Self {
            id: a.id,
            title: a.title,
            description: a.description.unwrap_or_default(),
            asset_type: parse_asset_type(first_present([a.asset_type, a.asset_type_camel, None])),
            url: first_present([a.link_url, a.url, a.link]).unwrap_or_default(),
            thumbnail_url: first_present([a.thumbnail_url, a.thumbnail_url_camel, None])
                .unwrap_or_default(),
            tags: a.tags.or(details.tags).unwrap_or_default(),
            is_featured: a.is_featured.or(details.is_featured).unwrap_or(false),
            is_active: a.is_active.or(details.is_active).unwrap_or(true),
            created_at: a.created_at,
        }
    }
}

/// Build the multipart body. `existing` is the asset being edited.
fn asset_payload(form: &AssetForm, existing: Option<&PortfolioAsset>) -> Result<Payload, ApiError> {
    if form.title.trim().is_empty() {
        return Err(DomainError::validation("title", "Title is required.").into());
    }

    let mut data = json!({
        "title": form.title.trim(),
        "description": form.description.trim(),
        "asset_type": form.asset_type.as_str(),
        "details": {
            "is_featured": form.is_featured,
            "is_active": form.is_active,
            "tags": [],
        },
    });
    let mut parts = Vec::new();

    if let Some(thumbnail) = non_empty(form.thumbnail.as_ref()) {
        parts.push(FormPart::file("thumbnail", thumbnail));
    } else if let Some(asset) = existing {
        data["thumbnail_url"] = Value::from(asset.thumbnail_url.as_str());
    }

    match form.asset_type {
        AssetType::Media => {
            let link = form
                .link()
                .ok_or_else(|| DomainError::validation("link_url", "Main Link URL is required."))?;
            data["link"] = Value::from(link);
        }
        AssetType::Art => {
            data["link"] = Value::from(form.link().unwrap_or(ART_PLACEHOLDER_LINK));
        }
        AssetType::Voiceover => {
            if let Some(audio) = non_empty(form.audio_file.as_ref()) {
                parts.push(FormPart::file("audioFile", audio));
            } else if let Some(asset) = existing {
                data["link_url"] = Value::from(asset.url.as_str());
            } else {
                return Err(DomainError::validation(
                    "audio_file",
                    "Voice-over file upload is required.",
                )
                .into());
            }
        }
    }

    parts.push(FormPart::text("data", data.to_string()));
    Ok(Payload::Multipart(parts))
}

impl Resource for PortfolioAsset {
    type Dto = PortfolioAssetDto;
    const NAME: &'static str = "portfolio assets";

    fn list_path(scope: &Scope) -> Result<Option<String>, ApiError> {
        let asset_type = scope.asset_type.unwrap_or_default();
        Ok(Some(format!("/portfolio/assets/{asset_type}")))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into()
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for PortfolioAsset {
    type Form = AssetForm;

    fn create_request(form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        Ok(Request::new(
            Method::POST,
            "/portfolio/assets",
            Some(asset_payload(form, None)?),
        ))
    }

    fn update_request(record: &Self, form: &Self::Form, _scope: &Scope) -> Result<Request, ApiError> {
        Ok(Request::new(
            Method::PATCH,
            format!("/portfolio/assets/{}", record.id),
            Some(asset_payload(form, Some(record))?),
        ))
    }
}

impl Deletable for PortfolioAsset {
    fn delete_path(record: &Self) -> String {
        format!("/portfolio/assets/{}", record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zw_common::Attachment;

    fn data_part(request: &Request) -> Value {
        let Some(Payload::Multipart(parts)) = &request.payload else {
            panic!("expected multipart payload");
        };
        parts
            .iter()
            .find_map(|p| match p {
                FormPart::Text { name, value } if name == "data" => serde_json::from_str(value).ok(),
                _ => None,
            })
            .expect("data part")
    }

    fn file_parts(request: &Request) -> Vec<String> {
        let Some(Payload::Multipart(parts)) = &request.payload else {
            return Vec::new();
        };
        parts
            .iter()
            .filter(|p| matches!(p, FormPart::File { .. }))
            .map(|p| p.name().to_string())
            .collect()
    }

    fn existing(asset_type: AssetType) -> PortfolioAsset {
        PortfolioAsset {
            id: "a-1".into(),
            title: "Reel".into(),
            description: String::new(),
            asset_type,
            url: "https://cdn.example/old.mp3".into(),
            thumbnail_url: "https://cdn.example/thumb.png".into(),
            tags: Vec::new(),
            is_featured: false,
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_art_without_link_gets_placeholder() {
        let form = AssetForm {
            title: "Poster".into(),
            asset_type: AssetType::Art,
            thumbnail: Some(Attachment::new("poster.jpg", vec![1, 2, 3])),
            ..AssetForm::default()
        };
        let request = PortfolioAsset::create_request(&form, &Scope::default()).unwrap();
        assert_eq!(request.path, "/portfolio/assets");
        assert_eq!(data_part(&request)["link"], ART_PLACEHOLDER_LINK);
        assert_eq!(file_parts(&request), ["thumbnail"]);
    }

    #[test]
    fn test_art_keeps_supplied_link() {
        let form = AssetForm {
            title: "Poster".into(),
            asset_type: AssetType::Art,
            link_url: Some("https://behance.example/poster".into()),
            ..AssetForm::default()
        };
        let request = PortfolioAsset::create_request(&form, &Scope::default()).unwrap();
        assert_eq!(data_part(&request)["link"], "https://behance.example/poster");
    }

    #[test]
    fn test_media_requires_link() {
        let form = AssetForm {
            title: "Documentary".into(),
            ..AssetForm::default()
        };
        let err = PortfolioAsset::create_request(&form, &Scope::default()).unwrap_err();
        assert_eq!(err.to_string(), "Main Link URL is required.");
    }

    #[test]
    fn test_voiceover_create_requires_audio() {
        let form = AssetForm {
            title: "Narration".into(),
            asset_type: AssetType::Voiceover,
            ..AssetForm::default()
        };
        assert!(PortfolioAsset::create_request(&form, &Scope::default()).is_err());
    }

    #[test]
    fn test_voiceover_edit_without_file_reuses_urls() {
        let record = existing(AssetType::Voiceover);
        let form = AssetForm {
            title: "Narration v2".into(),
            asset_type: AssetType::Voiceover,
            ..AssetForm::default()
        };
        let request = PortfolioAsset::update_request(&record, &form, &Scope::default()).unwrap();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/portfolio/assets/a-1");
        let data = data_part(&request);
        assert_eq!(data["link_url"], "https://cdn.example/old.mp3");
        assert_eq!(data["thumbnail_url"], "https://cdn.example/thumb.png");
        assert!(file_parts(&request).is_empty());
    }

    #[test]
    fn test_dto_accepts_mixed_case_keys() {
        let dto: PortfolioAssetDto = serde_json::from_str(
            r#"{"id": 4, "title": "Poster", "asset_type": "ART", "link_url": "https://x.example",
                "thumbnailUrl": "https://x.example/t.png",
                "details": {"is_featured": true, "is_active": false, "tags": ["print"]}}"#,
        )
        .unwrap();
        let asset = PortfolioAsset::from_dto(dto);
        assert_eq!(asset.asset_type, AssetType::Art);
        assert_eq!(asset.url, "https://x.example");
        assert!(asset.is_featured);
        assert!(!asset.is_active);
        assert_eq!(asset.tags, ["print"]);
    }

    #[test]
    fn test_unknown_asset_type_falls_back_to_media() {
        assert_eq!(parse_asset_type(Some("Sculpture".into())), AssetType::Media);
        assert_eq!(parse_asset_type(Some(" VoiceOver ".into())), AssetType::Voiceover);
        assert_eq!(parse_asset_type(None), AssetType::Media);

        let dto: PortfolioAssetDto =
            serde_json::from_str(r#"{"id": 5, "title": "Bust", "assetType": "sculpture"}"#).unwrap();
        assert_eq!(PortfolioAsset::from_dto(dto).asset_type, AssetType::Media);
    }

    #[test]
    fn test_list_path_uses_tab() {
        let scope = Scope::default().with_asset_type(AssetType::Voiceover);
        assert_eq!(
            PortfolioAsset::list_path(&scope).unwrap().as_deref(),
            Some("/portfolio/assets/voiceover")
        );
    }
}
