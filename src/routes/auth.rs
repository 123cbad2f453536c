//! Auth routes: password sign-in and sign-up, Google OAuth, log-out.

use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::rerender;
use crate::services::auth as auth_svc;
use crate::state::AppState;
use crate::supabase::OAuthProvider;
use crate::views::{self, AuthScreen, AuthTab};

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct CallbackForm {
    #[serde(default)]
    access_token: String,
}

fn auth_page(jar: CookieJar, screen: &AuthScreen<'_>) -> Response {
    (jar, Html(views::auth_screen(screen))).into_response()
}

/// `POST /auth/sign-in`
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar, Form(form): Form<CredentialsForm>) -> Response {
    let mut visit = state.sessions.visit(&jar).await;
    if visit.is_logged_in() {
        return Redirect::to("/").into_response();
    }

    match auth_svc::sign_in(&state.auth, &mut visit, &form.email, &form.password).await {
        Ok(transition) => (state.sessions.keep(jar, visit).await, rerender(transition)).into_response(),
        Err(notice) => auth_page(jar, &AuthScreen {
            notice: Some(&notice),
            sign_in_email: form.email.trim(),
            ..AuthScreen::default()
        }),
    }
}

/// `POST /auth/sign-up`: never signs the visitor in.
pub async fn sign_up(State(state): State<AppState>, jar: CookieJar, Form(form): Form<CredentialsForm>) -> Response {
    if state.sessions.visit(&jar).await.is_logged_in() {
        return Redirect::to("/").into_response();
    }

    let notice = auth_svc::sign_up(&state.auth, &form.email, &form.password).await;
    auth_page(jar, &AuthScreen {
        tab: AuthTab::SignUp,
        notice: Some(&notice),
        sign_up_email: form.email.trim(),
        ..AuthScreen::default()
    })
}

/// `POST /auth/oauth/google`: shows the provider link, does not wait for it.
pub async fn start_google_oauth(State(state): State<AppState>, jar: CookieJar) -> Response {
    if state.sessions.visit(&jar).await.is_logged_in() {
        return Redirect::to("/").into_response();
    }

    let redirect_to = state.settings.oauth_redirect_to.as_deref();
    match auth_svc::start_oauth(&state.auth, OAuthProvider::Google, redirect_to).await {
        Ok(link) => auth_page(jar, &AuthScreen { oauth_link: Some(&link), ..AuthScreen::default() }),
        Err(notice) => auth_page(jar, &AuthScreen { notice: Some(&notice), ..AuthScreen::default() }),
    }
}

/// `GET /auth/callback`: provider landing page.
pub async fn oauth_callback_page() -> Html<String> {
    Html(views::oauth_callback())
}

/// `POST /auth/callback`: finish OAuth with the token the landing page posted.
pub async fn oauth_callback(State(state): State<AppState>, jar: CookieJar, Form(form): Form<CallbackForm>) -> Response {
    let mut visit = state.sessions.visit(&jar).await;
    if visit.is_logged_in() {
        return Redirect::to("/").into_response();
    }

    match auth_svc::complete_oauth(&state.auth, &mut visit, &form.access_token).await {
        Ok(transition) => (state.sessions.keep(jar, visit).await, rerender(transition)).into_response(),
        Err(notice) => auth_page(jar, &AuthScreen { notice: Some(&notice), ..AuthScreen::default() }),
    }
}

/// `POST /auth/logout`
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut visit = state.sessions.visit(&jar).await;
    let transition = auth_svc::log_out(&mut visit);
    (state.sessions.keep(jar, visit).await, rerender(transition)).into_response()
}
