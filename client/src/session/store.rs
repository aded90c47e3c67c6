//! Session Store
//!
//! Process-wide session fields, persisted as a JSON file.
//! File I/O uses `spawn_blocking`; writes are serialized by the write lock.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use zw_common::{AccessToken, Role, Session};

use crate::error::ApiError;

// ============================================================================
// Stored Fields
// ============================================================================

/// Everything the console keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSession {
    pub token: Option<AccessToken>,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub role_id: Option<String>,
    /// Selected business/tenant.
    pub business_id: Option<String>,
    /// Live vs. test mode.
    pub live_mode: bool,
}

impl StoredSession {
    /// The signed-in session, if a token and user id are present.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        let token = self.token.clone()?;
        let user_id = self.user_id.clone()?;
        Some(Session {
            token,
            user_id,
            display_name: self.display_name.clone().unwrap_or_default(),
            email: self.email.clone(),
            role: self.role.clone(),
            role_id: self.role_id.clone(),
        })
    }

    fn from_session(session: Session) -> Self {
        Self {
            token: Some(session.token),
            user_id: Some(session.user_id),
            display_name: Some(session.display_name),
            email: session.email,
            role: session.role,
            role_id: session.role_id,
            business_id: None,
            live_mode: false,
        }
    }
}

// ============================================================================
// File Persistence Helpers
// ============================================================================

fn load_from_file(path: &Path) -> StoredSession {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Corrupt session file, starting signed out: {e}");
            StoredSession::default()
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => StoredSession::default(),
        Err(e) => {
            warn!("Failed to read session file, starting signed out: {e}");
            StoredSession::default()
        }
    }
}

fn save_to_file(path: &Path, stored: &StoredSession) -> Result<(), ApiError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| ApiError::Storage(format!("Failed to create session directory: {e}")))?;
    }
    let json = serde_json::to_string_pretty(stored)
        .map_err(|e| ApiError::Storage(format!("Failed to serialize session: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| ApiError::Storage(format!("Failed to write session file: {e}")))
}

// ============================================================================
// Store
// ============================================================================

/// Shared handle to the session fields.
///
/// `set` on sign-in, `clear` on sign-out or a failed verification.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<StoredSession>>,
    path: Option<Arc<PathBuf>>,
}

impl SessionStore {
    /// Store that never touches the disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store backed by `path`, loading whatever is there.
    pub async fn open(path: PathBuf) -> Result<Self, ApiError> {
        let load_path = path.clone();
        let stored = tokio::task::spawn_blocking(move || load_from_file(&load_path)).await?;
        debug!("Session store opened at {}", path.display());
        Ok(Self {
            inner: Arc::new(RwLock::new(stored)),
            path: Some(Arc::new(path)),
        })
    }

    /// Snapshot of every stored field.
    pub async fn read(&self) -> StoredSession {
        self.inner.read().await.clone()
    }

    /// Current signed-in session.
    pub async fn session(&self) -> Option<Session> {
        self.inner.read().await.session()
    }

    pub async fn token(&self) -> Option<AccessToken> {
        self.inner.read().await.token.clone()
    }

    /// Replace the session after a successful sign-in.
    ///
    /// Business selection and live mode start over for the new session.
    pub async fn set(&self, session: Session) -> Result<(), ApiError> {
        info!("Session set for user {}", session.user_id);
        self.update(|stored| *stored = StoredSession::from_session(session))
            .await
    }

    /// Forget every stored field.
    pub async fn clear(&self) -> Result<(), ApiError> {
        info!("Session cleared");
        self.update(|stored| *stored = StoredSession::default()).await
    }

    pub async fn set_business_id(&self, business_id: Option<String>) -> Result<(), ApiError> {
        self.update(|stored| stored.business_id = business_id).await
    }

    pub async fn set_live_mode(&self, live: bool) -> Result<(), ApiError> {
        self.update(|stored| stored.live_mode = live).await
    }

    async fn update(&self, apply: impl FnOnce(&mut StoredSession)) -> Result<(), ApiError> {
        let mut guard = self.inner.write().await;
        apply(&mut guard);

        if let Some(path) = &self.path {
            let path = Arc::clone(path);
            let snapshot = guard.clone();
            tokio::task::spawn_blocking(move || save_to_file(&path, &snapshot)).await??;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: AccessToken::new("jwt-abc"),
            user_id: "42".into(),
            display_name: "Abebe".into(),
            email: Some("abebe@example.com".into()),
            role: Some(Role::Microfinance),
            role_id: Some("7".into()),
        }
    }

    #[tokio::test]
    async fn test_set_then_read() {
        let store = SessionStore::in_memory();
        assert!(store.session().await.is_none());

        store.set(session()).await.unwrap();
        let current = store.session().await.unwrap();
        assert_eq!(current.user_id, "42");
        assert_eq!(current.token.expose(), "jwt-abc");
    }

    #[tokio::test]
    async fn test_clear_forgets_everything() {
        let store = SessionStore::in_memory();
        store.set(session()).await.unwrap();
        store.set_business_id(Some("b-1".into())).await.unwrap();
        store.set_live_mode(true).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.read().await, StoredSession::default());
    }

    #[tokio::test]
    async fn test_set_resets_business_selection() {
        let store = SessionStore::in_memory();
        store.set_business_id(Some("b-1".into())).await.unwrap();
        store.set_live_mode(true).await.unwrap();

        store.set(session()).await.unwrap();
        let stored = store.read().await;
        assert_eq!(stored.business_id, None);
        assert!(!stored.live_mode);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::open(path.clone()).await.unwrap();
        store.set(session()).await.unwrap();
        store.set_business_id(Some("b-9".into())).await.unwrap();

        let reopened = SessionStore::open(path).await.unwrap();
        let stored = reopened.read().await;
        assert_eq!(stored.user_id.as_deref(), Some("42"));
        assert_eq!(stored.business_id.as_deref(), Some("b-9"));
        assert_eq!(stored.role, Some(Role::Microfinance));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open(path).await.unwrap();
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn test_session_requires_token_and_user() {
        let stored = StoredSession {
            user_id: Some("1".into()),
            ..StoredSession::default()
        };
        assert!(stored.session().is_none());
    }
}
