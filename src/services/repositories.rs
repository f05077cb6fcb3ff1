//! Repository operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::pagination::PaginationParams;
use crate::response::Response;
use crate::services::{IssuesService, PullsService, ReleasesService};
use crate::types::{Branch, Commit, Permission, Repository, Tag};
use reqwest::Method;
use serde::Deserialize;
use tokio::io::AsyncWrite;

/// Body of the collaborator permission endpoint.
#[derive(Debug, Deserialize)]
struct PermissionBody {
    permission: Permission,
}

/// Service for one repository.
pub struct RepoService<'a> {
    client: &'a GitHubClient,
    owner: String,
    repo: String,
}

impl<'a> RepoService<'a> {
    /// Creates a new repository service.
    pub fn new(client: &'a GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Gets the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Gets the repository name.
    pub fn name(&self) -> &str {
        &self.repo
    }

    fn path(&self, suffix: &str) -> String {
        format!("repos/{}/{}{}", self.owner, self.repo, suffix)
    }

    /// Gets the pull requests service.
    pub fn pulls(&self) -> PullsService<'a> {
        PullsService::new(self.client, &self.owner, &self.repo)
    }

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService<'a> {
        IssuesService::new(self.client, &self.owner, &self.repo)
    }

    /// Gets the releases service.
    pub fn releases(&self) -> ReleasesService<'a> {
        ReleasesService::new(self.client, &self.owner, &self.repo)
    }

    /// Gets the repository.
    pub async fn get(&self, ctx: &Context) -> GitHubResult<(Repository, Response)> {
        let request = self.client.new_request(ctx, Method::GET, &self.path(""))?;
        self.client.send_json(request).await
    }

    /// Gets a collaborator's permission level.
    pub async fn permission(
        &self,
        ctx: &Context,
        username: &str,
    ) -> GitHubResult<(Permission, Response)> {
        let path = self.path(&format!("/collaborators/{}/permission", username));
        let request = self.client.new_request(ctx, Method::GET, &path)?;
        let (body, response): (PermissionBody, _) = self.client.send_json(request).await?;
        Ok((body.permission, response))
    }

    /// Lists commits page by page.
    pub async fn commits(
        &self,
        ctx: &Context,
        page: PaginationParams,
    ) -> GitHubResult<(Vec<Commit>, Response)> {
        let request = self
            .client
            .new_page_request(ctx, Method::GET, &self.path("/commits"), page)?;
        self.client.send_json(request).await
    }

    /// Gets a commit by reference.
    pub async fn commit(&self, ctx: &Context, reference: &str) -> GitHubResult<(Commit, Response)> {
        let path = self.path(&format!("/commits/{}", reference));
        let request = self.client.new_request(ctx, Method::GET, &path)?;
        self.client.send_json(request).await
    }

    /// Gets a branch.
    pub async fn branch(&self, ctx: &Context, name: &str) -> GitHubResult<(Branch, Response)> {
        let path = self.path(&format!("/branches/{}", name));
        let request = self.client.new_request(ctx, Method::GET, &path)?;
        self.client.send_json(request).await
    }

    /// Enables or disables admin enforcement on a protected branch.
    pub async fn set_branch_protection(
        &self,
        ctx: &Context,
        branch: &str,
        enabled: bool,
    ) -> GitHubResult<Response> {
        let method = if enabled { Method::POST } else { Method::DELETE };
        let path = self.path(&format!("/branches/{}/protection/enforce_admins", branch));
        let request = self.client.new_request(ctx, method, &path)?;
        self.client.send_discard(request).await
    }

    /// Lists tags page by page.
    pub async fn tags(
        &self,
        ctx: &Context,
        page: PaginationParams,
    ) -> GitHubResult<(Vec<Tag>, Response)> {
        let request = self
            .client
            .new_page_request(ctx, Method::GET, &self.path("/tags"), page)?;
        self.client.send_json(request).await
    }

    /// Streams a tar archive of `reference` into `writer`.
    pub async fn download_tar_archive(
        &self,
        ctx: &Context,
        reference: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> GitHubResult<Response> {
        let path = self.path(&format!("/tarball/{}", reference));
        let request = self.client.new_request(ctx, Method::GET, &path)?;
        self.client.send_to_writer(request, writer).await
    }

    /// Streams a zip archive of `reference` into `writer`.
    pub async fn download_zip_archive(
        &self,
        ctx: &Context,
        reference: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> GitHubResult<Response> {
        let path = self.path(&format!("/zipball/{}", reference));
        let request = self.client.new_request(ctx, Method::GET, &path)?;
        self.client.send_to_writer(request, writer).await
    }
}
