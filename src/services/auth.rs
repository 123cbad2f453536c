//! Auth screen actions: sign-in, sign-up, OAuth, log-out.
//!
//! Every remote call is single-shot. Failures become notices and leave the
//! session untouched; only a confirmed user plus session reaches
//! `gate::establish_session`.

use super::Notice;
use crate::error::ErrorCode;
use crate::session::Session;
use crate::session::gate::{self, Rerender};
use crate::supabase::{AuthError, AuthHandle, OAuthProvider};

pub const SIGN_IN_MISSING_FIELDS: &str = "Please enter both email and password.";
pub const SIGN_UP_MISSING_FIELDS: &str = "Please enter email and password.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SIGN_UP_CONFIRMATION: &str =
    "Account created. Check your email for confirmation (if enabled), then sign in from the Sign In tab.";
pub const OAUTH_LINK_PROMPT: &str = "Open this link to continue Google sign-in:";

/// Result of starting an OAuth sign-in: a link the visitor opens manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthLink {
    pub prompt: &'static str,
    pub url: String,
}

fn fields_present(email: &str, password: &str) -> bool {
    !email.trim().is_empty() && !password.is_empty()
}

/// Password sign-in.
///
/// # Errors
///
/// Returns the notice to show when the visitor stays signed out.
pub async fn sign_in(handle: &AuthHandle, session: &mut Session, email: &str, password: &str) -> Result<Rerender, Notice> {
    if !fields_present(email, password) {
        return Err(Notice::Error(SIGN_IN_MISSING_FIELDS.into()));
    }
    let email = email.trim();
    tracing::debug!(%email, "sign-in attempt");

    let result = match handle.get().await {
        Ok(client) => client.sign_in_with_password(email, password).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => match gate::complete_sign_in(session, response) {
            Ok(rerender) => {
                let user_id = session.user().and_then(|u| u.id.as_deref()).unwrap_or("");
                tracing::info!(%user_id, "signed in");
                Ok(rerender)
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.error_code(), "sign-in incomplete");
                Err(Notice::Error(INVALID_CREDENTIALS.into()))
            }
        },
        Err(AuthError::Rejected(reason)) => {
            tracing::warn!(%reason, "sign-in rejected");
            Err(Notice::Error(INVALID_CREDENTIALS.into()))
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "sign-in failed");
            Err(Notice::Error(format!("Sign-in error: {e}")))
        }
    }
}

/// Account registration. Never establishes a session.
pub async fn sign_up(handle: &AuthHandle, email: &str, password: &str) -> Notice {
    if !fields_present(email, password) {
        return Notice::Error(SIGN_UP_MISSING_FIELDS.into());
    }
    let email = email.trim();
    tracing::debug!(%email, "sign-up attempt");

    let result = match handle.get().await {
        Ok(client) => client.sign_up(email, password).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            let user_id = response.user.and_then(|u| u.id).unwrap_or_default();
            tracing::info!(%user_id, "account created");
            Notice::Success(SIGN_UP_CONFIRMATION.into())
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "sign-up failed");
            Notice::Error(format!("Sign-up error: {e}"))
        }
    }
}

/// Ask the auth service where to send the visitor for `provider`.
/// Completion happens on a later request (see [`complete_oauth`]).
///
/// # Errors
///
/// Returns the notice to show when no link could be produced.
pub async fn start_oauth(
    handle: &AuthHandle,
    provider: OAuthProvider,
    redirect_to: Option<&str>,
) -> Result<OAuthLink, Notice> {
    let result = match handle.get().await {
        Ok(client) => client.sign_in_with_oauth(provider, redirect_to).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            tracing::info!(provider = response.provider.as_str(), "oauth redirect issued");
            Ok(OAuthLink { prompt: OAUTH_LINK_PROMPT, url: response.url })
        }
        Err(e) => {
            tracing::error!(provider = provider.as_str(), error = %e, code = e.error_code(), "oauth start failed");
            Err(Notice::Error(format!("Google OAuth error: {e}")))
        }
    }
}

/// Finish an OAuth sign-in with the token the provider redirect carried.
/// The session is established only once the auth service confirms the user.
///
/// # Errors
///
/// Returns the notice to show when the token is missing or not accepted.
pub async fn complete_oauth(handle: &AuthHandle, session: &mut Session, access_token: &str) -> Result<Rerender, Notice> {
    let access_token = access_token.trim();
    if access_token.is_empty() {
        return Err(Notice::Error("Google OAuth error: missing access token".into()));
    }

    let result = match handle.get().await {
        Ok(client) => client.get_user(access_token).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            tracing::info!(user_id = user.id.as_deref().unwrap_or(""), "signed in with oauth");
            Ok(gate::establish_session(session, &user, access_token))
        }
        Err(e) => {
            tracing::warn!(error = %e, code = e.error_code(), "oauth completion failed");
            Err(Notice::Error(format!("Google OAuth error: {e}")))
        }
    }
}

/// Log out the visitor. Local only; the remote token simply lapses.
pub fn log_out(session: &mut Session) -> Rerender {
    if let Some(user) = session.user() {
        tracing::info!(user_id = user.id.as_deref().unwrap_or(""), "signed out");
    }
    gate::terminate_session(session)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
