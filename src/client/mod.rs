//! GitHub API client implementation.

use crate::auth::AuthMethod;
use crate::config::{parse_base_url, GitHubConfig, GitHubConfigBuilder};
use crate::context::Context;
use crate::errors::{GitHubError, GitHubResult};
use crate::observability::TracingHooks;
use crate::pagination::{PaginationParams, Pages};
use crate::rate::{Rate, RateCache, RateGroup};
use crate::request::{ApiRequest, Purpose, RequestBuilder};
use crate::response::{Destination, Response};
use crate::scopes::{missing_scopes, parse_scopes, Scope, HEADER_OAUTH_SCOPES};
use crate::services::{RepoService, SearchService, UsersService};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

/// Media type requested on every call.
pub const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Header selecting the REST API version.
pub const HEADER_API_VERSION: &str = "x-github-api-version";

/// GitHub error response format.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// GitHub API client.
///
/// Each client owns its rate cache; two clients never share quota state.
pub struct GitHubClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: GitHubConfig,
    api_url: Url,
    upload_url: Url,
    download_url: Url,
    /// Headers sent with every request.
    headers: HeaderMap,
    /// Last rate seen per group.
    rates: RateCache,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        config.validate()?;

        let api_url = parse_base_url("API", &config.api_url)?;
        let upload_url = parse_base_url("upload", &config.upload_url)?;
        let download_url = parse_base_url("download", &config.download_url)?;
        let headers = default_headers(&config)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| {
                GitHubError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_cause(e)
            })?;

        Ok(Self {
            http,
            config,
            api_url,
            upload_url,
            download_url,
            headers,
            rates: RateCache::new(),
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Gets the base URL requests of the given purpose resolve against.
    pub fn base_url(&self, purpose: Purpose) -> &Url {
        match purpose {
            Purpose::Api => &self.api_url,
            Purpose::Upload => &self.upload_url,
            Purpose::Download => &self.download_url,
        }
    }

    pub(crate) fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    // Service accessors

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Gets the search service.
    pub fn search(&self) -> SearchService<'_> {
        SearchService::new(self)
    }

    /// Gets the service for one repository.
    pub fn repo(&self, owner: impl Into<String>, repo: impl Into<String>) -> RepoService<'_> {
        RepoService::new(self, owner, repo)
    }

    // Rate cache

    /// Gets the last rate reported for a group.
    pub fn rate(&self, group: RateGroup) -> Option<Rate> {
        self.rates.get(group)
    }

    /// Gets every rate reported so far.
    pub fn rates(&self) -> HashMap<RateGroup, Rate> {
        self.rates.snapshot()
    }

    // Request construction

    /// Starts building a request.
    pub fn request(
        &self,
        purpose: Purpose,
        method: Method,
        path: impl Into<String>,
    ) -> RequestBuilder<'_> {
        RequestBuilder::new(self, purpose, method, path)
    }

    /// Builds an API request without a body.
    pub fn new_request(&self, ctx: &Context, method: Method, path: &str) -> GitHubResult<ApiRequest> {
        self.request(Purpose::Api, method, path).context(ctx).build()
    }

    /// Builds an API request with a JSON body.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: &B,
    ) -> GitHubResult<ApiRequest> {
        self.request(Purpose::Api, method, path)
            .context(ctx)
            .json(body)
            .build()
    }

    /// Builds an API request with page size and page number parameters.
    pub fn new_page_request(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        page: PaginationParams,
    ) -> GitHubResult<ApiRequest> {
        self.request(Purpose::Api, method, path)
            .context(ctx)
            .page(page)
            .build()
    }

    /// Builds a POST against the upload base URL that streams `file`.
    pub async fn new_upload_request(
        &self,
        ctx: &Context,
        path: &str,
        file: impl AsRef<Path>,
    ) -> GitHubResult<ApiRequest> {
        self.request(Purpose::Upload, Method::POST, path)
            .context(ctx)
            .build_upload(file)
            .await
    }

    /// Builds a GET against the download base URL.
    pub fn new_download_request(&self, ctx: &Context, path: &str) -> GitHubResult<ApiRequest> {
        self.request(Purpose::Download, Method::GET, path)
            .context(ctx)
            .build()
    }

    // Dispatch

    /// Executes a request and delivers the body to `destination`.
    ///
    /// Returns the response envelope on success. On failure nothing is
    /// returned besides the error, and a decode target keeps its prior value.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        destination: Destination<'_, T>,
    ) -> GitHubResult<Response> {
        let context = request.context.clone();
        let (raw, response) = self.execute(request).await?;

        match destination {
            Destination::Decode(target) => {
                *target = read_json(&context, raw).await?;
            }
            Destination::Writer(writer) => {
                context.run(write_body(raw, writer)).await??;
            }
            Destination::Discard => {
                context.run(drain_body(raw)).await??;
            }
        }

        Ok(response)
    }

    /// Executes a request and decodes the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> GitHubResult<(T, Response)> {
        let context = request.context.clone();
        let (raw, response) = self.execute(request).await?;
        let value = read_json(&context, raw).await?;
        Ok((value, response))
    }

    /// Executes a request and streams the body into `writer`.
    pub async fn send_to_writer(
        &self,
        request: ApiRequest,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> GitHubResult<Response> {
        self.send::<()>(request, Destination::Writer(writer)).await
    }

    /// Executes a request and drops the body.
    pub async fn send_discard(&self, request: ApiRequest) -> GitHubResult<Response> {
        self.send::<()>(request, Destination::Discard).await
    }

    /// Checks that the credential carries every scope in `scopes`.
    pub async fn ensure_scopes(&self, ctx: &Context, scopes: &[Scope]) -> GitHubResult<Response> {
        let request = self.new_request(ctx, Method::GET, "user")?;
        let response = self.send_discard(request).await?;

        let granted = parse_scopes(response.header(HEADER_OAUTH_SCOPES).unwrap_or_default());
        let missing = missing_scopes(&granted, scopes);
        if !missing.is_empty() {
            return Err(GitHubError::insufficient_scopes(&missing));
        }

        Ok(response)
    }

    /// Performs the round trip and classifies the status.
    ///
    /// The rate cache is updated from any response that carries rate headers,
    /// including error responses.
    async fn execute(&self, request: ApiRequest) -> GitHubResult<(reqwest::Response, Response)> {
        let ApiRequest {
            method,
            path: _,
            url,
            rate_group,
            headers,
            body,
            context,
        } = request;

        TracingHooks::on_request_start(&method, &url, &headers);
        let start = Instant::now();

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body.into_reqwest());
        }

        let raw = context
            .run(builder.send())
            .await?
            .map_err(GitHubError::from_reqwest)?;

        let status = raw.status();
        TracingHooks::on_response(&method, &url, status.as_u16(), start.elapsed());

        let rate = Rate::from_headers(raw.headers(), rate_group);
        if let Some(rate) = &rate {
            self.rates.record(rate.clone());
            TracingHooks::on_rate_limit_update(rate);
        }

        if status.as_u16() >= 400 {
            let body = context.run(raw.bytes()).await?.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_default();
            return Err(GitHubError::api(method, url, status.as_u16(), message));
        }

        let response = Response {
            status,
            headers: raw.headers().clone(),
            url: raw.url().clone(),
            pages: Pages::from_headers(raw.headers()),
            rate,
        };

        Ok((raw, response))
    }
}

fn default_headers(config: &GitHubConfig) -> GitHubResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
    headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);
    headers.insert(HEADER_API_VERSION, header_value("API version", &config.api_version)?);

    if let Some(auth) = &config.auth {
        let mut value = header_value("credential", &auth.authorization_header())?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> GitHubResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        GitHubError::configuration(format!("{} is not a valid header value", name)).with_cause(e)
    })
}

async fn read_json<T: DeserializeOwned>(ctx: &Context, raw: reqwest::Response) -> GitHubResult<T> {
    let bytes = ctx.run(raw.bytes()).await?.map_err(GitHubError::from_reqwest)?;
    serde_json::from_slice(&bytes).map_err(GitHubError::decoding)
}

async fn write_body(
    raw: reqwest::Response,
    writer: &mut (dyn AsyncWrite + Unpin + Send),
) -> GitHubResult<()> {
    let mut stream = raw.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(GitHubError::from_reqwest)?;
        writer.write_all(&chunk).await.map_err(|e| {
            GitHubError::transport(format!("failed to write response body: {}", e)).with_cause(e)
        })?;
    }
    writer.flush().await.map_err(|e| {
        GitHubError::transport(format!("failed to write response body: {}", e)).with_cause(e)
    })
}

async fn drain_body(raw: reqwest::Response) -> GitHubResult<()> {
    let mut stream = raw.bytes_stream();
    while let Some(chunk) = stream.next().await {
        chunk.map_err(GitHubError::from_reqwest)?;
    }
    Ok(())
}

/// Builder for GitHubClient.
pub struct GitHubClientBuilder {
    config_builder: GitHubConfigBuilder,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: GitHubConfig::builder(),
        }
    }

    /// Points all three base URLs at one server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_url(url);
        self
    }

    /// Sets the upload base URL.
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.upload_url(url);
        self
    }

    /// Sets the download base URL.
    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.download_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets a personal access token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::pat(token))
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sets the API version header.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_version(version);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let config = self.config_builder.build()?;
        GitHubClient::new(config)
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
