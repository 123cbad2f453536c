//! Stable error codes for structured logging.
//!
//! Module error enums stay `thiserror`-derived; this trait adds a short
//! machine-readable code so log lines can be grouped without parsing the
//! human message.

pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
