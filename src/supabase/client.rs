//! Supabase (GoTrue) REST client.
//!
//! Thin HTTP wrapper for the `/auth/v1` endpoints. Response handling lives in
//! pure functions below so it can be tested without a network.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use super::AuthBackend;
use super::types::{
    AuthError, AuthResponse, AuthSession, AuthUser, OAuthProvider, OAuthResponse, PasswordCredentials, SignUpResponse,
};
use crate::config::{Credentials, HttpTimeouts};

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: &Credentials, timeouts: HttpTimeouts) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: credentials.supabase_url.trim_end_matches('/').to_owned(),
            anon_key: credentials.supabase_anon_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Send a request with the anon key and return `(status, body)`.
    async fn send(&self, request: reqwest::RequestBuilder, bearer: &str) -> Result<(u16, String), AuthError> {
        let response = request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl AuthBackend for SupabaseClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let request = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password });
        let (status, body) = self.send(request, &self.anon_key).await?;

        if is_success(status) {
            return parse_token_response(&body);
        }
        if is_rejected_credentials(status, &body) {
            return Err(AuthError::Rejected(error_message(&body)));
        }
        Err(AuthError::Api { status, message: error_message(&body) })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, AuthError> {
        let request = self
            .http
            .post(self.endpoint("signup"))
            .json(&PasswordCredentials { email, password });
        let (status, body) = self.send(request, &self.anon_key).await?;

        if !is_success(status) {
            return Err(AuthError::Api { status, message: error_message(&body) });
        }
        parse_signup_response(&body)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<OAuthResponse, AuthError> {
        let url = authorize_url(&self.base_url, provider, redirect_to)?;
        Ok(OAuthResponse { provider, url })
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let request = self.http.get(self.endpoint("user"));
        let (status, body) = self.send(request, access_token).await?;

        match status {
            s if is_success(s) => parse_user(&body),
            401 | 403 => Err(AuthError::Rejected(error_message(&body))),
            _ => Err(AuthError::Api { status, message: error_message(&body) }),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_token_response(body: &str) -> Result<AuthResponse, AuthError> {
    let token: TokenResponse = serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;
    let session = token
        .access_token
        .filter(|t| !t.is_empty())
        .map(|access_token| AuthSession { access_token });
    Ok(AuthResponse { user: token.user, session })
}

/// Sign-up returns the user at the top level when email confirmation is on,
/// or nested under `user` alongside a session when it is off.
fn parse_signup_response(body: &str) -> Result<SignUpResponse, AuthError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;

    let nested = value.get("user").filter(|u| u.is_object()).cloned();
    let user_value = match nested {
        Some(user) => Some(user),
        None if value.get("id").is_some() => Some(value),
        None => None,
    };
    let user = user_value
        .map(serde_json::from_value::<AuthUser>)
        .transpose()
        .map_err(|e| AuthError::Parse(e.to_string()))?;
    Ok(SignUpResponse { user })
}

fn parse_user(body: &str) -> Result<AuthUser, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))
}

/// Extract the human-readable message from an error body.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = [err.msg, err.error_description, err.message, err.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
        {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { "unknown error".to_owned() } else { trimmed.to_owned() }
}

/// A 400 carrying GoTrue's bad-credentials code.
fn is_rejected_credentials(status: u16, body: &str) -> bool {
    if status != 400 {
        return false;
    }
    serde_json::from_str::<ErrorBody>(body).is_ok_and(|err| {
        err.error.as_deref() == Some("invalid_grant") || err.error_code.as_deref() == Some("invalid_credentials")
    })
}

pub(crate) fn authorize_url(
    base_url: &str,
    provider: OAuthProvider,
    redirect_to: Option<&str>,
) -> Result<String, AuthError> {
    let mut url = Url::parse(&format!("{}/auth/v1/authorize", base_url.trim_end_matches('/')))
        .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("provider", provider.as_str());
        if let Some(target) = redirect_to {
            query.append_pair("redirect_to", target);
        }
    }
    Ok(url.into())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
