//! Gateway configuration parsed from environment variables.
//!
//! Parsing goes through a lookup function so tests can feed a fixed map
//! instead of mutating the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://travel-journal-api-bootcamp.do.dibimbing.id/api/v1";
pub const DEFAULT_UPSTREAM_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Upstream API root, without a trailing slash.
    pub upstream_base_url: String,
    pub upstream_api_key: String,
    pub timeouts: UpstreamTimeouts,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    pub public_dir: PathBuf,
}

impl GatewayConfig {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Required:
    /// - `UPSTREAM_API_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `UPSTREAM_BASE_URL`: default public travel-journal API
    /// - `UPSTREAM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `COOKIE_SECURE`: boolean; when unset, true iff `APP_ENV=production`
    /// - `PUBLIC_DIR`: default `public`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the API key is absent and
    /// [`ConfigError::Invalid`] when a numeric or boolean value fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let upstream_api_key = lookup("UPSTREAM_API_KEY")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("UPSTREAM_API_KEY"))?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let timeouts = UpstreamTimeouts {
            request_secs: parse_or(&lookup, "UPSTREAM_REQUEST_TIMEOUT_SECS", DEFAULT_UPSTREAM_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "UPSTREAM_CONNECT_TIMEOUT_SECS", DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS)?,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => lookup("APP_ENV").is_some_and(|env| env.trim().eq_ignore_ascii_case("production")),
        };

        let public_dir = lookup("PUBLIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from);

        Ok(Self { port, upstream_base_url, upstream_api_key, timeouts, cookie_secure, public_dir })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
