//! Error types for the GitHub REST client.

use reqwest::Method;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHubErrorKind {
    /// The request was built or dispatched without a [`Context`](crate::Context).
    InvalidContext,
    /// A path could not be resolved against the selected base URL.
    InvalidUrl,
    /// The client configuration is unusable.
    InvalidConfiguration,
    /// The request body could not be serialized.
    Encoding,
    /// A local file for upload is missing or unreadable.
    File,
    /// Network, DNS, timeout or cancellation failure.
    Transport,
    /// The API answered with a status code of 400 or above.
    Api,
    /// The response body could not be decoded.
    Decoding,
    /// The credential lacks one or more OAuth scopes.
    InsufficientScopes,
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContext => write!(f, "invalid_context"),
            Self::InvalidUrl => write!(f, "invalid_url"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::Encoding => write!(f, "encoding_error"),
            Self::File => write!(f, "file_error"),
            Self::Transport => write!(f, "transport_error"),
            Self::Api => write!(f, "api_error"),
            Self::Decoding => write!(f, "decoding_error"),
            Self::InsufficientScopes => write!(f, "insufficient_scopes"),
        }
    }
}

/// GitHub client error.
///
/// API errors carry the method, URL and status code of the failed call and
/// render as `"<METHOD> <path>: <status> <message>"`. Every other kind renders
/// as `[kind] message`.
#[derive(Error, Debug)]
pub struct GitHubError {
    kind: GitHubErrorKind,
    message: String,
    method: Option<Method>,
    url: Option<Url>,
    status_code: Option<u16>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.method, &self.url, self.status_code) {
            (GitHubErrorKind::Api, Some(method), Some(url), Some(status)) => {
                write!(f, "{} {}: {} {}", method, url.path(), status, self.message)
            }
            _ => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

impl GitHubError {
    /// Creates a new error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            method: None,
            url: None,
            status_code: None,
            cause: None,
        }
    }

    /// Creates an API error for a non-successful response.
    ///
    /// `message` is the `message` field of the error body, or empty when the
    /// body did not have that shape.
    pub fn api(method: Method, url: Url, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: GitHubErrorKind::Api,
            message: message.into(),
            method: Some(method),
            url: Some(url),
            status_code: Some(status),
            cause: None,
        }
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> GitHubErrorKind {
        self.kind
    }

    /// Gets the error message. For API errors this is the server message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP method of a failed API call.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Gets the URL of a failed API call.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns true for errors produced from a non-successful response.
    pub fn is_api_error(&self) -> bool {
        self.kind == GitHubErrorKind::Api
    }

    /// Returns true for network-level failures.
    pub fn is_transport_error(&self) -> bool {
        self.kind == GitHubErrorKind::Transport
    }

    /// Returns true if the call was aborted by its context.
    pub fn is_cancelled(&self) -> bool {
        self.kind == GitHubErrorKind::Transport
            && self
                .cause
                .as_ref()
                .map_or(false, |c| c.downcast_ref::<crate::context::ContextError>().is_some())
    }

    // Convenience constructors

    /// Creates a missing-context error.
    pub fn invalid_context() -> Self {
        Self::new(GitHubErrorKind::InvalidContext, "nil Context")
    }

    /// Creates a URL composition error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidUrl, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates a request body encoding error.
    pub fn encoding(cause: serde_json::Error) -> Self {
        Self::new(GitHubErrorKind::Encoding, format!("failed to encode request body: {}", cause))
            .with_cause(cause)
    }

    /// Creates a local file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::File, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Transport, message)
    }

    /// Creates a decoding error from a JSON parse failure.
    pub fn decoding(cause: serde_json::Error) -> Self {
        let message = if cause.is_eof() {
            "unexpected EOF".to_string()
        } else {
            format!("failed to decode response body: {}", cause)
        };
        Self::new(GitHubErrorKind::Decoding, message).with_cause(cause)
    }

    /// Creates an error naming the OAuth scopes the credential lacks.
    pub fn insufficient_scopes(missing: &[crate::scopes::Scope]) -> Self {
        let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
        Self::new(
            GitHubErrorKind::InsufficientScopes,
            format!("missing OAuth scopes: {}", names.join(", ")),
        )
    }

    /// Creates a transport error from a reqwest failure.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else if err.is_body() || err.is_decode() {
            format!("unexpected EOF: {}", err)
        } else {
            format!("request failed: {}", err)
        };
        Self::transport(message).with_cause(err)
    }
}
