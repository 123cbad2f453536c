//! Gemini `generateContent` REST client.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Pure parsing in
//! `parse_response` for testability.

use std::time::Duration;

use super::config::GenAiConfig;
use super::types::{GenAiError, GenerateContent, GeneratedContent};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GenAiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }
}

#[async_trait::async_trait]
impl GenerateContent for GeminiClient {
    fn default_model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, model: &str, prompt: &str) -> Result<GeneratedContent, GenAiError> {
        let body = ApiRequest { contents: [RequestContent { parts: [RequestPart { text: prompt }] }] };

        let response = self
            .http
            .post(endpoint(&self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(GenAiError::ApiResponse { status, message: error_message(&text) });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint(base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'))
}

fn parse_response(json: &str) -> Result<GeneratedContent, GenAiError> {
    serde_json::from_str(json).map_err(|e| GenAiError::ApiParse(e.to_string()))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body).map_or_else(|_| body.trim().to_owned(), |env| env.error.message)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
