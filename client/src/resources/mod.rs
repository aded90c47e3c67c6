//! Resource Views
//!
//! One generic list/edit/delete cycle shared by every dashboard resource:
//! fetch the list, open a create/edit dialog, submit, re-fetch. Deletes need
//! an explicit confirmation step. Failed mutations keep the dialog open and
//! the previously displayed list visible.

pub mod blog;
pub mod compliance;
pub mod customers;
pub mod faqs;
pub mod inquiries;
pub mod microfinance;
pub mod portfolio;
pub mod roles;
pub mod settings;
pub mod subaccounts;
pub mod table;
pub mod transactions;

use std::mem;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use zw_common::{AssetType, Role};

use crate::error::ApiError;
use crate::network::{ApiClient, Payload};
use crate::session::StoredSession;

// ============================================================================
// Scope
// ============================================================================

/// Session-derived context a list or mutation is scoped by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub business_id: Option<String>,
    pub live_mode: bool,
    /// Portfolio tab.
    pub asset_type: Option<AssetType>,
}

impl Scope {
    #[must_use]
    pub fn from_stored(stored: &StoredSession) -> Self {
        Self {
            user_id: stored.user_id.clone(),
            role: stored.role.clone(),
            business_id: stored.business_id.clone(),
            live_mode: stored.live_mode,
            asset_type: None,
        }
    }

    #[must_use]
    pub const fn with_asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    pub fn user_id(&self) -> Result<&str, ApiError> {
        self.user_id
            .as_deref()
            .ok_or(ApiError::MissingSessionField("user id"))
    }

    pub fn business_id(&self) -> Result<&str, ApiError> {
        self.business_id
            .as_deref()
            .ok_or(ApiError::MissingSessionField("business id"))
    }

    /// Tenant id when the session belongs to a microfinance user, `None` for admins.
    pub fn tenant(&self) -> Result<Option<&str>, ApiError> {
        match &self.role {
            None => Err(ApiError::MissingSessionField("role")),
            Some(role) if role.is_microfinance() => self.user_id().map(Some),
            Some(_) => Ok(None),
        }
    }
}

// ============================================================================
// Resource Traits
// ============================================================================

/// A mutation to send.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub payload: Option<Payload>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, payload: Option<Payload>) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
        }
    }

    pub fn json<B: Serialize>(method: Method, path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self::new(method, path, Some(Payload::json(body)?)))
    }
}

/// A listable record type.
pub trait Resource: Clone + Serialize {
    /// Wire shape of one list element.
    type Dto: DeserializeOwned;

    /// Plural name for logs and notices.
    const NAME: &'static str;

    /// List endpoint for `scope`. `None` means there is nothing to fetch yet.
    fn list_path(scope: &Scope) -> Result<Option<String>, ApiError>;

    fn from_dto(dto: Self::Dto) -> Self;

    fn id(&self) -> &str;
}

/// A record type with a create/edit dialog.
pub trait Editable: Resource {
    type Form;

    fn create_request(form: &Self::Form, scope: &Scope) -> Result<Request, ApiError> {
        let _ = (form, scope);
        Err(ApiError::Unsupported("create"))
    }

    fn update_request(record: &Self, form: &Self::Form, scope: &Scope) -> Result<Request, ApiError>;
}

/// A record type that can be deleted.
pub trait Deletable: Resource {
    fn delete_path(record: &Self) -> String;
}

// ============================================================================
// View State
// ============================================================================

/// State of one resource view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading {
        previous: Option<T>,
    },
    Ready(T),
    Error {
        message: String,
        previous: Option<T>,
    },
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ViewState<T> {
    /// What to render: the data, or the stale data kept across a load or failure.
    #[must_use]
    pub const fn displayed(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading { previous } | Self::Error { previous, .. } => previous.as_ref(),
            Self::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    fn take_displayed(&mut self) -> Option<T> {
        match mem::replace(self, Self::Idle) {
            Self::Ready(data) => Some(data),
            Self::Loading { previous } | Self::Error { previous, .. } => previous,
            Self::Idle => None,
        }
    }
}

/// Which dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogMode<R> {
    Create,
    Edit(R),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

// ============================================================================
// Resource View
// ============================================================================

/// In-memory list of `R` kept in sync with the backend.
#[derive(Debug)]
pub struct ResourceView<R: Resource> {
    api: ApiClient,
    scope: Scope,
    state: ViewState<Vec<R>>,
    dialog: Option<DialogMode<R>>,
    pending_delete: Option<R>,
    notices: Vec<Notice>,
}

impl<R: Resource> ResourceView<R> {
    #[must_use]
    pub const fn new(api: ApiClient, scope: Scope) -> Self {
        Self {
            api,
            scope,
            state: ViewState::Idle,
            dialog: None,
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState<Vec<R>> {
        &self.state
    }

    /// Records to render.
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.state.displayed().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Switch scope (e.g. portfolio tab). Takes effect on the next refresh.
    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    #[must_use]
    pub const fn dialog(&self) -> Option<&DialogMode<R>> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub const fn pending_delete(&self) -> Option<&R> {
        self.pending_delete.as_ref()
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Drain queued notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }

    /// Fetch the list and replace the held one wholesale.
    pub async fn refresh(&mut self) {
        let previous = self.state.take_displayed();
        self.state = ViewState::Loading { previous };

        self.state = match self.fetch().await {
            Ok(records) => {
                debug!("Fetched {} {}", records.len(), R::NAME);
                ViewState::Ready(records)
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", R::NAME, e);
                ViewState::Error {
                    message: e.to_string(),
                    previous: None,
                }
            }
        };
    }

    async fn fetch(&self) -> Result<Vec<R>, ApiError> {
        let Some(path) = R::list_path(&self.scope)? else {
            return Ok(Vec::new());
        };
        let dtos: Vec<R::Dto> = self.api.get_list(&path).await?;
        Ok(dtos.into_iter().map(R::from_dto).collect())
    }

    /// Send `request`; on success re-fetch once, on failure keep the stale list.
    async fn mutate(&mut self, request: Request, success: String) -> Result<(), ApiError> {
        let previous = self.state.take_displayed();
        self.state = ViewState::Loading {
            previous: previous.clone(),
        };

        match self
            .api
            .send(request.method, &request.path, request.payload)
            .await
        {
            Ok(()) => {
                info!("{}", success);
                self.notices.push(Notice {
                    kind: NoticeKind::Success,
                    message: success,
                });
                self.state = ViewState::Ready(previous.unwrap_or_default());
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.notices.push(Notice {
                    kind: NoticeKind::Error,
                    message: e.to_string(),
                });
                self.state = ViewState::Error {
                    message: e.to_string(),
                    previous,
                };
                Err(e)
            }
        }
    }

    /// Run a resource-specific action through the same settle-then-refetch cycle.
    pub async fn run_action(&mut self, request: Request, success: &str) -> Result<(), ApiError> {
        self.mutate(request, success.to_string()).await
    }

    pub fn open_create(&mut self) {
        self.dialog = Some(DialogMode::Create);
    }

    pub fn open_edit(&mut self, record: R) {
        self.dialog = Some(DialogMode::Edit(record));
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Ask for confirmation before deleting `record`.
    pub fn request_delete(&mut self, record: R) {
        self.pending_delete = Some(record);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Find a displayed record by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&R> {
        self.records().iter().find(|r| r.id() == id)
    }
}

impl<R: Editable> ResourceView<R> {
    /// Submit the open dialog.
    ///
    /// Validation failures send nothing. Backend failures keep the dialog open.
    pub async fn submit(&mut self, form: &R::Form) -> Result<(), ApiError> {
        let (request, verb) = match self.dialog.as_ref().ok_or(ApiError::NoOpenDialog)? {
            DialogMode::Create => (R::create_request(form, &self.scope)?, "created"),
            DialogMode::Edit(record) => (R::update_request(record, form, &self.scope)?, "updated"),
        };

        self.mutate(request, format!("{} {verb} successfully", singular(R::NAME)))
            .await?;
        self.dialog = None;
        Ok(())
    }
}

impl<R: Deletable> ResourceView<R> {
    /// Delete the record awaiting confirmation.
    pub async fn confirm_delete(&mut self) -> Result<(), ApiError> {
        let record = self
            .pending_delete
            .take()
            .ok_or(ApiError::NothingToConfirm)?;
        let request = Request::new(Method::DELETE, R::delete_path(&record), None);

        let result = self
            .mutate(request, format!("{} deleted successfully", singular(R::NAME)))
            .await;
        if result.is_err() {
            self.pending_delete = Some(record);
        }
        result
    }
}

fn singular(name: &str) -> String {
    let base = name.strip_suffix("ies").map_or_else(
        || name.strip_suffix('s').unwrap_or(name).to_string(),
        |stem| format!("{stem}y"),
    );
    let mut chars = base.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
