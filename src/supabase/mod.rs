//! Auth client handle: remote authentication service contract.
//!
//! DESIGN
//! ======
//! `AuthBackend` is the seam between the session gate and the hosted auth
//! service. The production implementation speaks the Supabase (GoTrue) REST
//! API; tests substitute an in-memory mock. `AppState` holds a lazily built
//! `AuthHandle` shared by every visitor context.

pub mod client;
pub mod types;

use std::sync::Arc;

use crate::config::{Credentials, HttpTimeouts};
use crate::handle::LazyHandle;
pub use types::{AuthError, AuthResponse, AuthSession, AuthUser, OAuthProvider, OAuthResponse, SignUpResponse};

/// Process-wide, read-only handle to the auth backend.
pub type AuthHandle = LazyHandle<dyn AuthBackend, AuthError>;

/// Remote auth operations. Every call is single-shot; callers never retry.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Password sign-in. Refused credentials surface as [`AuthError::Rejected`].
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;

    /// Register a new account. Does not sign the visitor in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, AuthError>;

    /// Build the provider redirect URL for an OAuth sign-in.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<OAuthResponse, AuthError>;

    /// Resolve the user that owns `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
}

/// Build the lazily constructed production handle.
#[must_use]
pub fn auth_handle(credentials: Credentials, timeouts: HttpTimeouts) -> AuthHandle {
    LazyHandle::new(move || {
        let client = client::SupabaseClient::new(&credentials, timeouts)?;
        tracing::info!(url = %credentials.supabase_url, "auth client initialized");
        Ok(Arc::new(client) as Arc<dyn AuthBackend>)
    })
}
