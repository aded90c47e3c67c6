//! Blog Posts

use reqwest::Method;
use serde_json::json;
use zw_common::{BlogPost, PostForm, PostStatus};

use super::{Deletable, Editable, Request, Resource, Scope};
use crate::error::ApiError;

fn post_body(form: &PostForm, scope: &Scope) -> serde_json::Value {
    json!({
        "title": form.title.trim(),
        "slug": form.effective_slug(),
        "summary": form.summary.trim(),
        "content": form.content,
        "imageUrl": form.image_url.as_deref().map(str::trim).filter(|u| !u.is_empty()),
        "tags": form.tags,
        "status": form.status,
        "authorId": scope.user_id,
        "publishedAt": (form.status == PostStatus::Published)
            .then(|| chrono::Utc::now().to_rfc3339()),
    })
}

impl Resource for BlogPost {
    type Dto = Self;
    const NAME: &'static str = "blog posts";

    fn list_path(_scope: &Scope) -> Result<Option<String>, ApiError> {
        Ok(Some("/blog/posts".to_string()))
    }

    fn from_dto(dto: Self::Dto) -> Self {
        dto
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Editable for BlogPost {
    type Form = PostForm;

    fn create_request(form: &Self::Form, scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        Request::json(Method::POST, "/blog/posts", &post_body(form, scope))
    }

    fn update_request(record: &Self, form: &Self::Form, scope: &Scope) -> Result<Request, ApiError> {
        form.validate()?;
        let mut body = post_body(form, scope);
        // Keep the original publication date when a published post is edited.
        if record.status == PostStatus::Published && form.status == PostStatus::Published {
            body["publishedAt"] = json!(record.published_at);
        }
        Request::json(Method::PUT, format!("/blog/posts/{}", record.id), &body)
    }
}

impl Deletable for BlogPost {
    fn delete_path(record: &Self) -> String {
        format!("/blog/posts/{}", record.id)
    }
}
