//! Generative AI: text completion for the Reports page.
//!
//! DESIGN
//! ======
//! `GenerateContent` is the provider-neutral seam; `GeminiClient` speaks the
//! Gemini REST API. The handle is built lazily because its key is optional
//! for the rest of the dashboard: construction fails, uncached, until
//! `GOOGLE_API_KEY` is set.

pub mod config;
pub mod gemini;
pub mod types;

use std::sync::Arc;

use crate::handle::LazyHandle;
pub use types::{GenAiError, GenerateContent, GeneratedContent};

pub type GenAiHandle = LazyHandle<dyn GenerateContent, GenAiError>;

/// Build the lazily constructed production handle.
#[must_use]
pub fn genai_handle() -> GenAiHandle {
    LazyHandle::new(|| {
        let config = config::GenAiConfig::from_env()?;
        let client = gemini::GeminiClient::new(config)?;
        tracing::info!(model = client.default_model(), "generative AI client initialized");
        Ok(Arc::new(client) as Arc<dyn GenerateContent>)
    })
}
