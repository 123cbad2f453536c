//! Session gate: the single decision point of every render cycle.
//!
//! `render` picks the visible surface from `is_logged_in` alone. The two
//! transitions return a `Rerender` marker that the HTTP layer turns into a
//! redirect to `/`, so the browser immediately re-renders with the new state.

use super::{Session, SessionUser};
use crate::error::ErrorCode;
use crate::supabase::{AuthResponse, AuthUser};

/// Which surface a render cycle shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AuthScreen,
    NavigatedApp,
}

/// Returned by every state transition; the caller must re-render.
#[must_use = "a session transition must be followed by a re-render"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rerender;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    /// The auth service answered without both a user and a session.
    #[error("incomplete sign-in result (user: {has_user}, session: {has_session})")]
    Incomplete { has_user: bool, has_session: bool },
}

impl ErrorCode for GateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Incomplete { .. } => "E_INCOMPLETE_SIGN_IN",
        }
    }
}

#[must_use]
pub fn render(session: &Session) -> View {
    if session.is_logged_in { View::NavigatedApp } else { View::AuthScreen }
}

/// Populate the session. Call only once the auth service has confirmed both
/// a user and an active session.
pub fn establish_session(session: &mut Session, user: &AuthUser, access_token: impl Into<String>) -> Rerender {
    session.user = Some(SessionUser { id: user.id.clone(), email: user.email.clone() });
    session.access_token = Some(access_token.into());
    session.is_logged_in = true;
    debug_assert!(session.invariant_holds());
    Rerender
}

/// Reset the session to its initial logged-out state.
pub fn terminate_session(session: &mut Session) -> Rerender {
    *session = Session::new();
    debug_assert!(session.invariant_holds());
    Rerender
}

/// Apply a password sign-in result. Leaves the session untouched unless
/// both halves are present.
///
/// # Errors
///
/// Returns [`GateError::Incomplete`] when the user or the session is missing.
pub fn complete_sign_in(session: &mut Session, response: AuthResponse) -> Result<Rerender, GateError> {
    match (response.user, response.session) {
        (Some(user), Some(auth_session)) => Ok(establish_session(session, &user, auth_session.access_token)),
        (user, auth_session) => {
            Err(GateError::Incomplete { has_user: user.is_some(), has_session: auth_session.is_some() })
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
