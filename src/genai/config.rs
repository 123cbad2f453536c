//! Generative-AI configuration parsed from environment variables.
//!
//! Read lazily on the first report request rather than at startup: the rest
//! of the dashboard works without an AI key.

use super::types::GenAiError;
use crate::config::{HttpTimeouts, env_parse_u64};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: HttpTimeouts,
}

impl GenAiConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GOOGLE_API_KEY`
    ///
    /// Optional:
    /// - `GENAI_MODEL`: default `gemini-2.5-flash`
    /// - `GENAI_BASE_URL`: default Gemini REST base URL
    /// - `GENAI_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GENAI_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenAiError::MissingApiKey { var: API_KEY_VAR.into() })?;

        let model = std::env::var("GENAI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("GENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("GENAI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GENAI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
