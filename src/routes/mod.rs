//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page GET is one render cycle: resolve the visitor's session, ask the
//! gate which view to show, render it. Actions are form POSTs; a session
//! transition answers with `303 See Other` to `/` so the browser re-renders
//! with the new state, anything else answers with the current view plus a
//! notice.

pub mod auth;
pub mod pages;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::session::gate::Rerender;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/pages/reports/generate", post(pages::generate_report))
        .route("/pages/{slug}", get(pages::page))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/oauth/google", post(auth::start_google_oauth))
        .route("/auth/callback", get(auth::oauth_callback_page).post(auth::oauth_callback))
        .route("/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a session transition into the re-render the browser performs.
pub(crate) fn rerender(_: Rerender) -> Redirect {
    Redirect::to("/")
}

/// Resolve the path to the stylesheet directory.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
