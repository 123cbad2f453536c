//! Auth service wire types and errors.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth service operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Well-formed request, credentials refused by the service.
    #[error("{0}")]
    Rejected(String),

    /// The service returned a non-success HTTP status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// An endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "E_AUTH_REJECTED",
            Self::Api { .. } => "E_AUTH_API",
            Self::Request(_) => "E_AUTH_REQUEST",
            Self::Parse(_) => "E_AUTH_PARSE",
            Self::InvalidUrl(_) => "E_AUTH_URL",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// USERS AND SESSIONS
// =============================================================================

/// The subset of the auth service's user object this service reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// An active session issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
}

/// Result of a password sign-in. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

/// Result of a sign-up. No session is implied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpResponse {
    pub user: Option<AuthUser>,
}

// =============================================================================
// OAUTH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Redirect target the visitor opens to continue with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthResponse {
    pub provider: OAuthProvider,
    pub url: String,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
