//! Teacher authentication and session tracking.
//!
//! Credentials are plaintext pairs read from a JSON file on every
//! authentication attempt, so edits to the file apply without a restart.
//! Sessions are opaque bearer tokens held in process memory and dropped
//! on restart.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::models::{Session, TeacherCredential, TeacherRoster};

/// Read-only source of teacher credentials. Queried on every
/// authentication attempt; an unavailable source yields an empty roster
/// rather than an error.
pub trait CredentialProvider: Send + Sync {
    fn teachers(&self) -> Vec<TeacherCredential>;
}

/// Credential file on disk, re-read per query.
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for FileCredentials {
    fn teachers(&self) -> Vec<TeacherCredential> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    %err,
                    "credential file unavailable, using empty roster"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<TeacherRoster>(&bytes) {
            Ok(roster) => roster.teachers,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "credential file unparseable, using empty roster"
                );
                Vec::new()
            }
        }
    }
}

/// Active-session record: token -> username.
///
/// Identity comes from this map, never from re-parsing the token string,
/// even though the token happens to embed the username.
struct SessionSet {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionSet {
    fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn open(&self, username: &str) -> Session {
        let mut sessions = self.sessions.write().await;
        // Deterministic token: username plus the active-session count.
        // The format is observable behavior, not an implementation detail.
        let token = format!("teacher_{}_{}", username, sessions.len());
        sessions.insert(token.clone(), username.to_string());
        Session {
            token,
            username: username.to_string(),
        }
    }

    async fn resolve(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).map(|username| Session {
            token: token.to_string(),
            username: username.clone(),
        })
    }

    async fn close(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// Authentication service: validates credentials against the injected
/// provider and tracks active sessions.
pub struct AuthService {
    credentials: Box<dyn CredentialProvider>,
    sessions: SessionSet,
}

impl AuthService {
    pub fn new(credentials: Box<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            sessions: SessionSet::new(),
        }
    }

    /// Exact username+password match against the current roster.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.credentials
            .teachers()
            .iter()
            .any(|teacher| teacher.username == username && teacher.password == password)
    }

    /// Validates credentials and opens a session on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        if !self.authenticate(username, password) {
            tracing::warn!(username = %username, "login rejected");
            return Err(ApiError::Unauthorized(
                "Invalid username or password".into(),
            ));
        }

        let session = self.sessions.open(username).await;
        tracing::info!(username = %username, "teacher logged in");
        Ok(session)
    }

    /// Closes the caller's session. Unauthorized if no current session
    /// resolves from the presented token.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let session = self
            .resolve(token)
            .await
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".into()))?;

        self.sessions.close(&session.token).await;
        tracing::info!(username = %session.username, "teacher logged out");
        Ok(())
    }

    /// Optional-auth probe: the active session for `token`, if any.
    pub async fn resolve(&self, token: Option<&str>) -> Option<Session> {
        match token {
            Some(token) => self.sessions.resolve(token).await,
            None => None,
        }
    }

    /// Resolve or reject. Used by the middleware guarding mutating
    /// endpoints.
    pub async fn require(&self, token: Option<&str>) -> Result<Session, ApiError> {
        self.resolve(token).await.ok_or_else(|| {
            ApiError::Unauthorized(
                "Authentication required. Only teachers can perform this action.".into(),
            )
        })
    }
}
