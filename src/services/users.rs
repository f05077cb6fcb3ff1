//! User operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::response::Response;
use crate::types::User;
use reqwest::Method;

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets the authenticated user.
    pub async fn authenticated(&self, ctx: &Context) -> GitHubResult<(User, Response)> {
        let request = self.client.new_request(ctx, Method::GET, "user")?;
        self.client.send_json(request).await
    }

    /// Gets a user by username.
    pub async fn get(&self, ctx: &Context, username: &str) -> GitHubResult<(User, Response)> {
        let request = self
            .client
            .new_request(ctx, Method::GET, &format!("users/{}", username))?;
        self.client.send_json(request).await
    }
}
