//! Page routes: the gate, the eight destinations, the report download.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::pages::Page;
use crate::services::report;
use crate::session::Session;
use crate::session::gate::{self, View};
use crate::state::AppState;
use crate::views::{self, AuthScreen};

fn render(session: &Session, page: Page) -> String {
    match gate::render(session) {
        View::AuthScreen => views::auth_screen(&AuthScreen::default()),
        View::NavigatedApp => views::navigated_app(session, page, None),
    }
}

async fn render_cycle(state: &AppState, jar: CookieJar, page: Page) -> Response {
    let visit = state.sessions.visit(&jar).await;
    (jar, Html(render(&visit, page))).into_response()
}

/// `GET /`
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
    render_cycle(&state, jar, Page::default()).await
}

/// `GET /pages/{slug}`
pub async fn page(State(state): State<AppState>, jar: CookieJar, Path(slug): Path<String>) -> Response {
    let Some(page) = Page::from_slug(&slug) else {
        return (StatusCode::NOT_FOUND, "page not found").into_response();
    };
    render_cycle(&state, jar, page).await
}

/// `POST /pages/reports/generate`: the PDF as an attachment, or the Reports
/// page with the failure.
pub async fn generate_report(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = state.sessions.visit(&jar).await;
    if gate::render(&session) == View::AuthScreen {
        return (jar, Html(views::auth_screen(&AuthScreen::default()))).into_response();
    }

    match report::generate_report(&state.genai).await {
        Ok(artifact) => {
            let headers = [
                (CONTENT_TYPE, artifact.mime.to_owned()),
                (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", artifact.file_name)),
            ];
            (jar, headers, artifact.bytes).into_response()
        }
        Err(e) => {
            let notice = e.notice();
            (jar, Html(views::navigated_app(&session, Page::Reports, Some(&notice)))).into_response()
        }
    }
}
