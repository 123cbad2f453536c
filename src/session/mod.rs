//! Per-visitor authentication state.
//!
//! DESIGN
//! ======
//! One `Session` exists per visitor context. Its fields are private: page
//! handlers get `&Session` and read through accessors, while the only
//! mutations are the two transitions in [`gate`]. The invariant
//! `is_logged_in == (user.is_some() && access_token.is_some())` therefore
//! holds after every transition.

pub mod gate;
pub mod store;

/// Identity copied from the auth service at sign-in. Either field may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    is_logged_in: bool,
    user: Option<SessionUser>,
    access_token: Option<String>,
}

impl Session {
    /// Fresh logged-out state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[cfg(test)]
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Signed-in email, if the auth service reported one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }

    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.is_logged_in == (self.user.is_some() && self.access_token.is_some())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
