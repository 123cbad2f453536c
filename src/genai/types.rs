//! Generative-AI types: response shape, text extraction, errors.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by generative-AI client operations.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}: {message}")]
    ApiResponse { status: u16, message: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The response carried no text at all.
    #[error("model returned no text")]
    EmptyResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for GenAiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// A `generateContent` response. `text` is a convenience field some
/// compatible endpoints add; the canonical location is the candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeneratedContent {
    /// Plain text of the response: the top-level `text` when present,
    /// otherwise the text parts of the first candidate joined together.
    #[must_use]
    pub fn plain_text(&self) -> Option<String> {
        if let Some(text) = self.text.as_ref().filter(|t| !t.is_empty()) {
            return Some(text.clone());
        }
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let joined: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if joined.is_empty() { None } else { Some(joined) }
    }
}

// =============================================================================
// GENERATE CONTENT TRAIT
// =============================================================================

/// Provider-neutral async trait for text generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait GenerateContent: Send + Sync {
    /// Model used when the caller has no preference.
    fn default_model(&self) -> &str;

    /// Request a completion for `prompt` from `model`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the request fails or the response is malformed.
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<GeneratedContent, GenAiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
