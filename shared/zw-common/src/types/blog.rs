//! Blog Post Types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{require, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl FromStr for PostStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            _ => Err(Error::UnknownVariant {
                kind: "post status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct BlogPost {
    #[serde(deserialize_with = "crate::types::id::deserialize")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "crate::types::id::deserialize_opt")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Blog post create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    /// Leave blank to derive from the title.
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub status: PostStatus,
}

impl PostForm {
    #[must_use]
    pub fn from_record(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            tags: post.tags.clone(),
            status: post.status,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("title", &self.title, "Title is required.")?;
        require("content", &self.content, "Content is required.")?;
        if self.effective_slug().is_empty() {
            return Err(Error::validation(
                "slug",
                "Slug must contain at least one letter or digit.",
            ));
        }
        Ok(())
    }

    /// Slug to submit: the typed one, or one derived from the title.
    #[must_use]
    pub fn effective_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            slugify(&self.slug)
        }
    }
}

/// Lowercase, ASCII alphanumerics separated by single hyphens.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
