//! Release operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::pagination::PaginationParams;
use crate::request::Purpose;
use crate::response::Response;
use crate::types::{Release, ReleaseAsset, ReleaseParams};
use reqwest::Method;
use std::path::Path;
use tokio::io::AsyncWrite;

/// Service for releases in a repository.
pub struct ReleasesService<'a> {
    client: &'a GitHubClient,
    owner: String,
    repo: String,
}

impl<'a> ReleasesService<'a> {
    /// Creates a new releases service.
    pub fn new(client: &'a GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!("repos/{}/{}/releases{}", self.owner, self.repo, suffix)
    }

    /// Lists releases page by page.
    pub async fn list(
        &self,
        ctx: &Context,
        page: PaginationParams,
    ) -> GitHubResult<(Vec<Release>, Response)> {
        let request = self
            .client
            .new_page_request(ctx, Method::GET, &self.path(""), page)?;
        self.client.send_json(request).await
    }

    /// Gets the latest published release.
    pub async fn latest(&self, ctx: &Context) -> GitHubResult<(Release, Response)> {
        let request = self
            .client
            .new_request(ctx, Method::GET, &self.path("/latest"))?;
        self.client.send_json(request).await
    }

    /// Gets a release by ID.
    pub async fn get(&self, ctx: &Context, id: u64) -> GitHubResult<(Release, Response)> {
        let request = self
            .client
            .new_request(ctx, Method::GET, &self.path(&format!("/{}", id)))?;
        self.client.send_json(request).await
    }

    /// Gets a release by tag name.
    pub async fn get_by_tag(&self, ctx: &Context, tag: &str) -> GitHubResult<(Release, Response)> {
        let request = self
            .client
            .new_request(ctx, Method::GET, &self.path(&format!("/tags/{}", tag)))?;
        self.client.send_json(request).await
    }

    /// Creates a release.
    pub async fn create(
        &self,
        ctx: &Context,
        params: &ReleaseParams,
    ) -> GitHubResult<(Release, Response)> {
        let request = self
            .client
            .new_json_request(ctx, Method::POST, &self.path(""), params)?;
        self.client.send_json(request).await
    }

    /// Updates a release.
    pub async fn update(
        &self,
        ctx: &Context,
        id: u64,
        params: &ReleaseParams,
    ) -> GitHubResult<(Release, Response)> {
        let request = self.client.new_json_request(
            ctx,
            Method::PATCH,
            &self.path(&format!("/{}", id)),
            params,
        )?;
        self.client.send_json(request).await
    }

    /// Deletes a release.
    pub async fn delete(&self, ctx: &Context, id: u64) -> GitHubResult<Response> {
        let request = self
            .client
            .new_request(ctx, Method::DELETE, &self.path(&format!("/{}", id)))?;
        self.client.send_discard(request).await
    }

    /// Uploads a local file as a release asset.
    ///
    /// The asset is named after the file; `label` is optional.
    pub async fn upload_asset(
        &self,
        ctx: &Context,
        id: u64,
        file: impl AsRef<Path>,
        label: Option<&str>,
    ) -> GitHubResult<(ReleaseAsset, Response)> {
        let file = file.as_ref();
        let mut builder = self
            .client
            .request(Purpose::Upload, Method::POST, self.path(&format!("/{}/assets", id)))
            .context(ctx);
        if let Some(name) = file.file_name() {
            builder = builder.query_pair("name", name.to_string_lossy());
        }
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            builder = builder.query_pair("label", label);
        }

        let request = builder.build_upload(file).await?;
        self.client.send_json(request).await
    }

    /// Streams a release asset into `writer`.
    pub async fn download_asset(
        &self,
        ctx: &Context,
        tag: &str,
        name: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> GitHubResult<Response> {
        let path = format!("{}/{}/releases/download/{}/{}", self.owner, self.repo, tag, name);
        let request = self.client.new_download_request(ctx, &path)?;
        self.client.send_to_writer(request, writer).await
    }
}
