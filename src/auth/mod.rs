//! Credentials for GitHub API.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding a token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Authentication method for GitHub API.
///
/// All variants are sent as a bearer token. A client without a credential
/// makes anonymous calls with a lower quota.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Personal Access Token (classic or fine-grained).
    Pat(SecretString),
    /// OAuth token.
    OAuth(SecretString),
    /// GitHub Actions token (from GITHUB_TOKEN).
    Actions(SecretString),
}

impl AuthMethod {
    /// Creates a PAT authentication method.
    pub fn pat(token: impl Into<String>) -> Self {
        Self::Pat(SecretString::new(token.into()))
    }

    /// Creates an OAuth authentication method.
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::OAuth(SecretString::new(token.into()))
    }

    /// Creates a GitHub Actions token authentication method.
    pub fn actions(token: impl Into<String>) -> Self {
        Self::Actions(SecretString::new(token.into()))
    }

    /// Reads a token from an environment variable.
    ///
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env_var(var_name: &str) -> Option<Self> {
        std::env::var(var_name)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(Self::pat)
    }

    fn token(&self) -> &SecretString {
        match self {
            Self::Pat(t) | Self::OAuth(t) | Self::Actions(t) => t,
        }
    }

    /// Generates the Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token().expose_secret())
    }
}
