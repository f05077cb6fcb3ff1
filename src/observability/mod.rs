//! Tracing hooks for the request pipeline.

use crate::rate::Rate;
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Sensitive headers that should be redacted in logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "x-github-token",
    "x-access-token",
    "cookie",
    "set-cookie",
];

/// Redacts sensitive values in headers.
pub fn redact_header(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS.contains(&name.to_lowercase().as_str()) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

/// Renders headers for a log line, redacting credentials.
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            (name.to_string(), redact_header(name.as_str(), value))
        })
        .collect()
}

/// Tracing hooks for GitHub API operations.
///
/// Failures are returned to the caller and not logged here.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &Method, url: &Url, headers: &HeaderMap) {
        debug!(
            method = %method,
            url = %url,
            headers = ?redacted_headers(headers),
            "GitHub API request started"
        );
    }

    /// Logs the arrival of an API response.
    pub fn on_response(method: &Method, url: &Url, status: u16, duration: Duration) {
        debug!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "GitHub API response received"
        );
    }

    /// Logs rate limit info.
    pub fn on_rate_limit_update(rate: &Rate) {
        debug!(
            group = %rate.group,
            limit = rate.limit,
            remaining = rate.remaining,
            reset = %rate.reset,
            "Rate limit updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};

    #[test]
    fn test_redact_header() {
        assert_eq!(redact_header("Authorization", "Bearer token"), "[REDACTED]");
        assert_eq!(redact_header("Content-Type", "application/json"), "application/json");
    }

    #[test]
    fn test_redacted_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer ghp_secret"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let rendered = redacted_headers(&headers);

        assert!(rendered.contains(&("authorization".to_string(), "[REDACTED]".to_string())));
        assert!(rendered.contains(&(
            "accept".to_string(),
            "application/vnd.github+json".to_string()
        )));
    }
}
