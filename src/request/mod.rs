//! Outgoing request construction.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::{GitHubError, GitHubResult};
use crate::pagination::PaginationParams;
use crate::rate::RateGroup;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

/// Which base URL a request resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Regular JSON API calls.
    Api,
    /// Release asset uploads.
    Upload,
    /// Release asset and archive downloads.
    Download,
}

/// Body attached to a built request.
pub(crate) enum RequestBody {
    /// JSON-encoded payload.
    Json(Vec<u8>),
    /// Local file streamed as the payload. Dropping the body closes the file.
    File(tokio::fs::File),
}

impl RequestBody {
    pub(crate) fn into_reqwest(self) -> reqwest::Body {
        match self {
            Self::Json(bytes) => reqwest::Body::from(bytes),
            Self::File(file) => reqwest::Body::wrap_stream(ReaderStream::new(file)),
        }
    }
}

/// A fully resolved request, ready for [`GitHubClient::send`].
///
/// A request can only be built with a [`Context`], so every dispatched call is
/// cancellable.
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) url: Url,
    pub(crate) rate_group: RateGroup,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<RequestBody>,
    pub(crate) context: Context,
}

impl ApiRequest {
    /// Gets the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Gets the path relative to the base URL, as given by the caller.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Gets the resolved URL including query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Gets the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets the context the request runs under.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns true if a body is attached.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Gets the quota group this request is charged to.
    pub fn rate_group(&self) -> RateGroup {
        self.rate_group
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Builder for [`ApiRequest`].
pub struct RequestBuilder<'a> {
    client: &'a GitHubClient,
    purpose: Purpose,
    method: Method,
    path: String,
    context: Option<Context>,
    body: Option<Result<Vec<u8>, serde_json::Error>>,
    query: Vec<(String, String)>,
    query_error: Option<GitHubError>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(
        client: &'a GitHubClient,
        purpose: Purpose,
        method: Method,
        path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            purpose,
            method,
            path: path.into(),
            context: None,
            body: None,
            query: Vec::new(),
            query_error: None,
        }
    }

    /// Sets the context the request runs under. Required.
    pub fn context(mut self, ctx: &Context) -> Self {
        self.context = Some(ctx.clone());
        self
    }

    /// Sets a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_vec(body));
        self
    }

    /// Adds page size and page number parameters.
    pub fn page(mut self, params: PaginationParams) -> Self {
        self.query.extend(params.to_query());
        self
    }

    /// Adds a single query parameter.
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds every field of a serializable value as query parameters.
    pub fn query<P: Serialize + ?Sized>(mut self, params: &P) -> Self {
        match serde_urlencoded::to_string(params) {
            Ok(encoded) => {
                self.query.extend(
                    url::form_urlencoded::parse(encoded.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned())),
                );
            }
            Err(e) => {
                self.query_error = Some(
                    GitHubError::invalid_url(format!("failed to encode query parameters: {}", e))
                        .with_cause(e),
                );
            }
        }
        self
    }

    /// Builds the request.
    pub fn build(self) -> GitHubResult<ApiRequest> {
        let context = self.context.ok_or_else(GitHubError::invalid_context)?;

        let base = self.client.base_url(self.purpose);
        let mut url = resolve_url(base, &self.path)?;
        // Absolute same-origin URLs are accepted; group by the resolved path.
        let relative = url.path().strip_prefix(base.path()).unwrap_or_default();
        let rate_group = RateGroup::from_path(relative);
        if let Some(err) = self.query_error {
            return Err(err);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut headers = self.client.default_headers().clone();
        let body = match self.body {
            Some(Ok(bytes)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(RequestBody::Json(bytes))
            }
            Some(Err(e)) => return Err(GitHubError::encoding(e)),
            None => None,
        };

        Ok(ApiRequest {
            method: self.method,
            path: self.path,
            url,
            rate_group,
            headers,
            body,
            context,
        })
    }

    /// Builds the request with a local file as the streamed body.
    ///
    /// The file is owned by the returned request and closed when the request
    /// completes or is dropped.
    pub async fn build_upload(self, file: impl AsRef<Path>) -> GitHubResult<ApiRequest> {
        let mut request = Self { body: None, ..self }.build()?;
        let path = file.as_ref();

        let handle = tokio::fs::File::open(path).await.map_err(|e| {
            GitHubError::file(format!("open {}: {}", path.display(), e)).with_cause(e)
        })?;
        let metadata = handle.metadata().await.map_err(|e| {
            GitHubError::file(format!("stat {}: {}", path.display(), e)).with_cause(e)
        })?;
        if !metadata.is_file() || metadata.len() == 0 {
            return Err(GitHubError::file(format!("read {}: EOF", path.display())));
        }

        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        request.headers.insert(CONTENT_LENGTH, HeaderValue::from(metadata.len()));
        request.body = Some(RequestBody::File(handle));

        Ok(request)
    }
}

/// Resolves `path` beneath `base`.
pub(crate) fn resolve_url(base: &Url, path: &str) -> GitHubResult<Url> {
    let url = base.join(path.trim_start_matches('/')).map_err(|e| {
        GitHubError::invalid_url(format!("parse {:?}: {}", path, e)).with_cause(e)
    })?;

    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(GitHubError::invalid_url(format!(
            "path {:?} escapes base URL {}",
            path, base
        )));
    }

    Ok(url)
}
