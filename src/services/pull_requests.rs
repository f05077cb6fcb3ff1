//! Pull request operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::pagination::PaginationParams;
use crate::request::Purpose;
use crate::response::Response;
use crate::types::{CreatePullParams, Pull, PullsFilter, UpdatePullParams};
use reqwest::Method;

/// Service for pull requests in a repository.
pub struct PullsService<'a> {
    client: &'a GitHubClient,
    owner: String,
    repo: String,
}

impl<'a> PullsService<'a> {
    /// Creates a new pull requests service.
    pub fn new(client: &'a GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!("repos/{}/{}/pulls{}", self.owner, self.repo, suffix)
    }

    /// Gets a pull request by number.
    pub async fn get(&self, ctx: &Context, number: u64) -> GitHubResult<(Pull, Response)> {
        let request = self
            .client
            .new_request(ctx, Method::GET, &self.path(&format!("/{}", number)))?;
        self.client.send_json(request).await
    }

    /// Lists pull requests page by page.
    pub async fn list(
        &self,
        ctx: &Context,
        page: PaginationParams,
        filter: &PullsFilter,
    ) -> GitHubResult<(Vec<Pull>, Response)> {
        let mut builder = self
            .client
            .request(Purpose::Api, Method::GET, self.path(""))
            .context(ctx)
            .page(page);
        if let Some(state) = filter.state {
            builder = builder.query_pair("state", state.as_str());
        }
        let request = builder.build()?;
        self.client.send_json(request).await
    }

    /// Opens a pull request.
    pub async fn create(
        &self,
        ctx: &Context,
        params: &CreatePullParams,
    ) -> GitHubResult<(Pull, Response)> {
        let request = self
            .client
            .new_json_request(ctx, Method::POST, &self.path(""), params)?;
        self.client.send_json(request).await
    }

    /// Updates a pull request.
    pub async fn update(
        &self,
        ctx: &Context,
        number: u64,
        params: &UpdatePullParams,
    ) -> GitHubResult<(Pull, Response)> {
        let request = self.client.new_json_request(
            ctx,
            Method::PATCH,
            &self.path(&format!("/{}", number)),
            params,
        )?;
        self.client.send_json(request).await
    }
}
