//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service functions own the auth-screen and report logic so route handlers
//! stay focused on cookies, forms and responses. Outcomes the visitor should
//! see are returned as [`Notice`]s rather than HTTP errors.

pub mod auth;
pub mod report;

/// An inline message rendered on the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Error(t) | Self::Success(t) => t,
        }
    }

    /// CSS modifier used by the templates.
    #[must_use]
    pub fn level(&self) -> &'static str {
        match self {
            Self::Error(_) => "error",
            Self::Success(_) => "success",
        }
    }
}
