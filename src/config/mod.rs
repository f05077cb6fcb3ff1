//! Configuration types for the GitHub client.

use crate::auth::AuthMethod;
use crate::errors::GitHubError;
use std::time::Duration;
use url::Url;

/// Default GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default base URL for release asset uploads.
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Default base URL for release asset and archive downloads.
pub const DEFAULT_DOWNLOAD_URL: &str = "https://github.com";

/// Default GitHub API version (date-based).
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "integrations-github-rest/0.1.0";

/// Connection pool configuration passed to the transport.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base URL for API calls.
    pub api_url: String,
    /// Base URL for asset uploads.
    pub upload_url: String,
    /// Base URL for asset and archive downloads.
    pub download_url: String,
    /// API version header.
    pub api_version: String,
    /// Credential. `None` makes anonymous calls.
    pub auth: Option<AuthMethod>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Connection pool configuration.
    pub pool: PoolConfig,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool: PoolConfig::default(),
        }
    }
}

impl GitHubConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GitHubError> {
        for (name, value) in [
            ("API", &self.api_url),
            ("upload", &self.upload_url),
            ("download", &self.download_url),
        ] {
            parse_base_url(name, value)?;
        }

        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent is required by GitHub API"));
        }

        Ok(())
    }
}

/// Parses a base URL so that relative paths resolve beneath it.
pub(crate) fn parse_base_url(name: &str, value: &str) -> Result<Url, GitHubError> {
    if value.is_empty() {
        return Err(GitHubError::configuration(format!("{} base URL cannot be empty", name)));
    }

    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(GitHubError::configuration(format!(
            "{} base URL must start with http:// or https://",
            name
        )));
    }

    let normalized = format!("{}/", value.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| {
        GitHubError::configuration(format!("invalid {} base URL {}: {}", name, value, e))
            .with_cause(e)
    })
}

/// Builder for GitHubConfig.
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    api_url: Option<String>,
    upload_url: Option<String>,
    download_url: Option<String>,
    api_version: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    pool: Option<PoolConfig>,
}

impl GitHubConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the upload base URL.
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    /// Sets the download base URL.
    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    /// Points all three base URLs at one server. Useful against a mock.
    pub fn base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_url(url.clone())
            .upload_url(url.clone())
            .download_url(url)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a personal access token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::pat(token))
    }

    /// Reads the token from an environment variable, if it is set.
    pub fn token_from_env(mut self, var_name: &str) -> Self {
        if let Some(auth) = AuthMethod::from_env_var(var_name) {
            self.auth = Some(auth);
        }
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = Some(config);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<GitHubConfig, GitHubError> {
        let config = GitHubConfig {
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            upload_url: self.upload_url.unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string()),
            download_url: self.download_url.unwrap_or_else(|| DEFAULT_DOWNLOAD_URL.to_string()),
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth: self.auth,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pool: self.pool.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
