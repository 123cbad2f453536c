//! Startup configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! The auth service credentials are required: startup halts when either is
//! missing. Everything else has a default. The generative-AI key is not read
//! here; the Reports page checks it lazily (see `genai::config`).

use reqwest::Url;

use crate::error::ErrorCode;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 3600;
pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set (add it to the environment or the .env file)")]
    Missing { var: &'static str },
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} has an invalid value: {value}")]
    InvalidValue { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "E_MISSING_CONFIG",
            Self::InvalidUrl { .. } => "E_INVALID_URL",
            Self::InvalidValue { .. } => "E_INVALID_CONFIG",
        }
    }
}

/// Auth service credentials. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL without a trailing slash.
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Server-side settings with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
    pub cookie_secure: bool,
    pub oauth_redirect_to: Option<String>,
    pub session_idle_ttl_secs: u64,
    pub auth_timeouts: HttpTimeouts,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cookie_secure: false,
            oauth_redirect_to: None,
            session_idle_ttl_secs: DEFAULT_SESSION_IDLE_TTL_SECS,
            auth_timeouts: HttpTimeouts {
                request_secs: DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_AUTH_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub server: ServerSettings,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `OAUTH_REDIRECT_TO`: forwarded as `redirect_to` on OAuth starts
    /// - `COOKIE_SECURE`: inferred from `OAUTH_REDIRECT_TO` when absent
    /// - `SESSION_IDLE_TTL_SECS`: default 3600
    /// - `AUTH_REQUEST_TIMEOUT_SECS` / `AUTH_CONNECT_TIMEOUT_SECS`: default 30 / 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;

        let port = match non_empty(&lookup, "PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let oauth_redirect_to = non_empty(&lookup, "OAUTH_REDIRECT_TO");
        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| {
                oauth_redirect_to
                    .as_deref()
                    .is_some_and(|uri| uri.starts_with("https://"))
            });

        let server = ServerSettings {
            port,
            cookie_secure,
            oauth_redirect_to,
            session_idle_ttl_secs: parse_u64(&lookup, "SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL_SECS),
            auth_timeouts: HttpTimeouts {
                request_secs: parse_u64(&lookup, "AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_AUTH_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_u64(&lookup, "AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_AUTH_CONNECT_TIMEOUT_SECS),
            },
        };

        Ok(Self { credentials, server })
    }
}

impl Credentials {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = non_empty(lookup, "SUPABASE_URL").ok_or(ConfigError::Missing { var: "SUPABASE_URL" })?;
        let anon_key = non_empty(lookup, "SUPABASE_ANON_KEY").ok_or(ConfigError::Missing { var: "SUPABASE_ANON_KEY" })?;

        let parsed =
            Url::parse(&url).map_err(|e| ConfigError::InvalidUrl { var: "SUPABASE_URL", reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: "SUPABASE_URL",
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self { supabase_url: url.trim_end_matches('/').to_owned(), supabase_anon_key: anon_key })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn env_parse_u64(key: &str, default: u64) -> u64 {
    parse_u64(&|k: &str| std::env::var(k).ok(), key, default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
