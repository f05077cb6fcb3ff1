//! Response envelope and decode destinations.

use crate::pagination::Pages;
use crate::rate::Rate;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tokio::io::AsyncWrite;
use url::Url;

/// Where a successful response body goes.
pub enum Destination<'a, T = ()> {
    /// Parse the body as JSON into the target. The target is only assigned
    /// after the whole body parsed successfully.
    Decode(&'a mut T),
    /// Stream the body verbatim into a byte sink.
    Writer(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Read the body to the end and drop it.
    Discard,
}

/// Metadata of a successful call.
///
/// Pagination and rate are derived from the response headers only. A response
/// without a Link header has empty [`Pages`]; one without rate headers has no
/// [`Rate`].
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL after redirects.
    pub url: Url,
    /// Page numbers from the Link header.
    pub pages: Pages,
    /// Rate limit state reported with this response.
    pub rate: Option<Rate>,
}

impl Response {
    /// Gets a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
