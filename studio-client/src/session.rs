/// Session lifecycle
///
/// The session is the single process-wide piece of mutable auth state,
/// shared with the gateway behind a lock. All mutation goes through the
/// four operations below; login, register and logout are the only writers
/// of the persisted credential. Invariant: `user` is set iff `token` is
/// set and was last validated successfully.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use booking_core::UserProfile;

use crate::api::{ApiError, ApiGateway};

const AUTH_TIMEOUT: Duration = Duration::from_secs(10);
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

pub type SharedSession = Arc<RwLock<Session>>;

pub fn new_shared_session() -> SharedSession {
    Arc::new(RwLock::new(Session::default()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: UserProfile,
}

#[derive(Clone)]
pub struct SessionStore {
    gateway: ApiGateway,
    session: SharedSession,
    token_path: PathBuf,
}

impl SessionStore {
    pub fn new(gateway: ApiGateway, session: SharedSession, token_path: PathBuf) -> Self {
        Self {
            gateway,
            session,
            token_path,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response: AuthResponse = self
            .gateway
            .post_json("/auth/login", &LoginBody { email, password }, AUTH_TIMEOUT)
            .await
            .map_err(map_login_error)?;
        Ok(self.establish(response).await)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<UserProfile, AuthError> {
        // Rejected client-side, before any request is attempted.
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let body = RegisterBody {
            email,
            password,
            name,
            phone,
        };
        let response: AuthResponse = self
            .gateway
            .post_json("/auth/register", &body, AUTH_TIMEOUT)
            .await
            .map_err(map_register_error)?;
        Ok(self.establish(response).await)
    }

    /// Startup credential restore. A persisted token is validated by
    /// requesting the current identity; on any failure the credential is
    /// discarded so the session never rests in a half-valid state.
    pub async fn restore(&self) -> Option<UserProfile> {
        let token = read_token(&self.token_path)?;
        self.session.write().await.token = Some(token);

        match self
            .gateway
            .get_json::<UserProfile>("/auth/me", AUTH_TIMEOUT)
            .await
        {
            Ok(user) => {
                self.session.write().await.user = Some(user.clone());
                tracing::info!(email = %user.email, "session restored");
                Some(user)
            }
            Err(err) => {
                tracing::warn!("session restore failed, clearing credential: {err}");
                self.logout().await;
                None
            }
        }
    }

    /// Clears the persisted credential and the in-memory session. Never fails.
    pub async fn logout(&self) {
        if let Err(err) = fs::remove_file(&self.token_path) {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!("could not remove persisted credential: {err}");
            }
        }
        *self.session.write().await = Session::default();
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.user.is_some()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.session.read().await.user.clone()
    }

    async fn establish(&self, response: AuthResponse) -> UserProfile {
        persist_token(&self.token_path, &response.token);
        let mut session = self.session.write().await;
        session.token = Some(response.token);
        session.user = Some(response.user.clone());
        response.user
    }
}

fn read_token(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let token = raw.trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn persist_token(path: &Path, token: &str) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!("could not create credential directory: {err}");
                return;
            }
        }
    }
    if let Err(err) = fs::write(path, token) {
        tracing::warn!("could not persist credential: {err}");
    }
}

fn map_login_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Rejected { status: 401, .. } => AuthError::InvalidCredentials,
        ApiError::Rejected { detail, .. } => AuthError::Validation(detail),
        other => AuthError::Network(other.to_string()),
    }
}

fn map_register_error(err: ApiError) -> AuthError {
    match err {
        // The backend answers 400 for a duplicate account.
        ApiError::Rejected { status: 400, .. } => AuthError::Conflict,
        ApiError::Rejected { detail, .. } => AuthError::Validation(detail),
        other => AuthError::Network(other.to_string()),
    }
}
