//! Client configuration for the API endpoint and request timeout, plus the two
//! fixed views the session layer and the guards send users to. Values come
//! from CLI arguments or their `GATEKEEPER_*` environment fallbacks; none of
//! them are secret.

use crate::error::AuthError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5454/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
/// View shown after a successful login and used as the safe redirect target.
pub const LANDING_PATH: &str = "/products";
pub const LOGIN_PATH: &str = "/login";

/// Resolved client configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub timeout: Duration,
}

impl AppConfig {
    /// Builds a config from a raw base URL, normalizing whitespace and the
    /// trailing slash so relative endpoint paths join predictably.
    ///
    /// # Errors
    /// Returns `AuthError::Config` if the URL is empty, unparsable or not HTTP(S).
    pub fn new(api_base_url: &str, timeout_seconds: u64) -> Result<Self, AuthError> {
        let raw = normalize_value(api_base_url)
            .ok_or_else(|| AuthError::Config("API base URL is not configured.".to_string()))?;
        let api_base_url = parse_base_url(&raw)?;
        let timeout_seconds = if timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECONDS
        } else {
            timeout_seconds
        };

        Ok(Self {
            api_base_url,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(&format!("{DEFAULT_API_BASE_URL}/"))
                .unwrap_or_else(|_| unreachable!("default API base URL is valid")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, AuthError> {
    // A trailing slash makes `Url::join` append instead of replacing the last segment.
    let with_slash = format!("{}/", raw.trim_end_matches('/'));
    let url = Url::parse(&with_slash)
        .map_err(|err| AuthError::Config(format!("Invalid API base URL {raw}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AuthError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
