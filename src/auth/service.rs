//! Collaborator interface to the identity provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigSnapshot;

/// How the user chose to identify themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginMethod {
    Email,
    Phone,
}

/// One login-intent request handed to the identity service.
///
/// The snapshot is carried opaquely; the provider decides how to honor the
/// presentation options. `state` is set when the configuration asks for it
/// and must be echoed back unchanged on code responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub method: LoginMethod,
    pub config: ConfigSnapshot,
    pub state: Option<String>,
}

/// What a completed login hands back, shaped by the requested
/// [`ResponseType`](crate::config::ResponseType).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Credential {
    /// A token the client can use directly.
    AccessToken {
        token: String,
        account_id: String,
        expires_at: DateTime<Utc>,
    },
    /// An authorization code for server-side exchange, with the echoed state.
    AuthorizationCode {
        code: String,
        state: Option<String>,
    },
}

impl Credential {
    /// Whether this credential is past its expiry. Codes have no client-side
    /// expiry and never report expired here.
    pub fn is_expired(&self) -> bool {
        match self {
            Credential::AccessToken { expires_at, .. } => *expires_at <= Utc::now(),
            Credential::AuthorizationCode { .. } => false,
        }
    }
}

/// Account details fetched for an authenticated user. Exactly one of `email`
/// or `phone` is normally present, matching the method used to log in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub account_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Failures surfaced by the identity service or the session around it.
///
/// None of these are fatal; they are passed through to the presentation layer
/// for display and retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum IdentityError {
    #[error("login cancelled")]
    Cancelled,
    #[error("no authenticated account")]
    NotAuthenticated,
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// The identity provider as this core sees it.
///
/// `begin_login` is the only call the dispatcher depends on; the remaining
/// methods back the account session (restore, profile fetch, logout) and
/// login resume.
#[async_trait]
pub trait IdentityService: Send + Sync + 'static {
    /// Start a login attempt and resolve with the credential or a failure.
    async fn begin_login(&self, request: LoginRequest) -> Result<Credential, IdentityError>;

    /// Credential from a previous login, if the provider still holds one.
    async fn current_credential(&self) -> Option<Credential>;

    /// A login attempt interrupted before completion, if the provider can
    /// resume it.
    async fn pending_login(&self) -> Option<LoginMethod>;

    /// Fetch the account profile for the currently authenticated user.
    async fn request_account(&self) -> Result<AccountProfile, IdentityError>;

    /// Forget the current credential on the provider side.
    async fn log_out(&self);
}
