//! HTTP Client Wrapper
//!
//! Every backend call goes through [`ApiClient`]: bearer header from the
//! session store, JSON or multipart bodies, `{ data: ... }` envelopes unwrapped.

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};
use url::form_urlencoded;
use zw_common::Attachment;

use crate::config::Config;
use crate::error::ApiError;
use crate::session::SessionStore;

// ============================================================================
// Request Bodies
// ============================================================================

/// Request body.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Multipart(Vec<FormPart>),
}

impl Payload {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| ApiError::Decode(format!("Failed to encode request: {e}")))
    }
}

/// One multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, attachment: &Attachment) -> Self {
        Self::File {
            name: name.into(),
            file_name: attachment.file_name.clone(),
            bytes: attachment.bytes.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                bytes,
            } => {
                let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime.essence_str())?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Strip `{ data: ... }` envelopes.
///
/// An object with `data` and no `id` is an envelope; nested envelopes are
/// unwrapped too. Records that happen to carry a `data` field keep it.
#[must_use]
pub fn unwrap_envelope(mut value: Value) -> Value {
    loop {
        let is_envelope = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("data") && !obj.contains_key("id"));
        if !is_envelope {
            return value;
        }
        value = value
            .as_object_mut()
            .and_then(|obj| obj.remove("data"))
            .unwrap_or(Value::Null);
    }
}

/// Append a query string to `path`.
#[must_use]
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        error!("Failed to parse response: {}", e);
        ApiError::Decode(e.to_string())
    })
}

// ============================================================================
// Client
// ============================================================================

/// REST client bound to one backend and one session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the unwrapped JSON body, `None` when empty.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = self.session.token().await {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose()));
        }

        request = match payload {
            Some(Payload::Json(body)) => request.json(&body),
            Some(Payload::Multipart(parts)) => request.multipart(build_form(parts)?),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {}", method, path, e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} {} failed with status {}: {}", method, path, status, body);
            return Err(ApiError::from_response(status, &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!("{} {} returned invalid JSON: {}", method, path, e);
            ApiError::Decode(e.to_string())
        })?;
        debug!("{} {} -> {}", method, path, status);
        Ok(Some(unwrap_envelope(value)))
    }

    /// GET a body that must be present.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self
            .execute(Method::GET, path, None)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("Empty response from {path}")))?;
        decode(value)
    }

    /// GET a list. An empty or `null` body is an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        match self.execute(Method::GET, path, None).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => decode(value),
        }
    }

    /// Send a mutation and discard whatever comes back.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, payload).await.map(|_| ())
    }

    /// POST JSON and decode the response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self
            .execute(Method::POST, path, Some(Payload::json(body)?))
            .await?
            .ok_or_else(|| ApiError::Decode(format!("Empty response from {path}")))?;
        decode(value)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}
