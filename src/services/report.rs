//! Report generator: prompt → text → PDF.
//!
//! DESIGN
//! ======
//! One synchronous pipeline per request: resolve the generative-AI client
//! (fails before any remote call while the key is missing), request a
//! completion for a fixed prompt, extract plain text, lay it out as a PDF.
//! Every failure comes back as a `ReportError` for the page to display.

use super::Notice;
use crate::error::ErrorCode;
use crate::genai::{GenAiError, GenAiHandle, GenerateContent};
use crate::pdf::PdfDocument;

pub const REPORT_PROMPT: &str = "Generate a brief report summary about sales performance.";
pub const REPORT_FILE_NAME: &str = "Sample_Report.pdf";
pub const REPORT_MIME: &str = "application/pdf";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{var} not found. Please set it in your .env file.")]
    MissingApiKey { var: String },
    #[error("Report generation error: {0}")]
    Generation(GenAiError),
}

impl From<GenAiError> for ReportError {
    fn from(err: GenAiError) -> Self {
        match err {
            GenAiError::MissingApiKey { var } => Self::MissingApiKey { var },
            other => Self::Generation(other),
        }
    }
}

impl ErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::Generation(e) => e.error_code(),
        }
    }
}

impl ReportError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::Error(self.to_string())
    }
}

/// A finished, downloadable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Run the whole pipeline against the shared handle.
///
/// # Errors
///
/// Returns [`ReportError::MissingApiKey`] before any remote call when the key
/// is absent, or [`ReportError::Generation`] when the remote call fails.
pub async fn generate_report(handle: &GenAiHandle) -> Result<ReportArtifact, ReportError> {
    let client = match handle.get().await {
        Ok(client) => client,
        Err(e) => {
            let e = ReportError::from(e);
            tracing::warn!(error = %e, code = e.error_code(), "report generator unavailable");
            return Err(e);
        }
    };
    let result = generate_with(client.as_ref()).await;
    match &result {
        Ok(artifact) => tracing::info!(pages = artifact.page_count, bytes = artifact.bytes.len(), "report generated"),
        Err(e) => tracing::error!(error = %e, code = e.error_code(), "report generation failed"),
    }
    result
}

/// Generate a report with an already resolved client.
///
/// # Errors
///
/// Returns [`ReportError::Generation`] when the remote call fails or yields
/// no text.
pub async fn generate_with(client: &dyn GenerateContent) -> Result<ReportArtifact, ReportError> {
    let response = client
        .generate_content(client.default_model(), REPORT_PROMPT)
        .await?;
    let text = response.plain_text().ok_or(GenAiError::EmptyResponse)?;
    Ok(render_pdf(&text))
}

#[must_use]
pub fn render_pdf(text: &str) -> ReportArtifact {
    let mut doc = PdfDocument::new().with_title("Sample Report");
    doc.write_text(text);
    ReportArtifact { file_name: REPORT_FILE_NAME, mime: REPORT_MIME, bytes: doc.to_bytes(), page_count: doc.page_count() }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
