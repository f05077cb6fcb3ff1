//! Issue operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::pagination::PaginationParams;
use crate::request::Purpose;
use crate::response::Response;
use crate::types::{Event, Issue, IssuesFilter};
use chrono::SecondsFormat;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct IssuesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<String>,
}

impl From<&IssuesFilter> for IssuesQuery {
    fn from(filter: &IssuesFilter) -> Self {
        Self {
            state: filter.state.map(|s| s.as_str()),
            since: filter
                .since
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

/// Service for issues in a repository.
pub struct IssuesService<'a> {
    client: &'a GitHubClient,
    owner: String,
    repo: String,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Lists issues page by page. Pull requests are included.
    pub async fn list(
        &self,
        ctx: &Context,
        page: PaginationParams,
        filter: &IssuesFilter,
    ) -> GitHubResult<(Vec<Issue>, Response)> {
        let path = format!("repos/{}/{}/issues", self.owner, self.repo);
        let request = self
            .client
            .request(Purpose::Api, Method::GET, path)
            .context(ctx)
            .page(page)
            .query(&IssuesQuery::from(filter))
            .build()?;
        self.client.send_json(request).await
    }

    /// Lists events of an issue page by page.
    pub async fn events(
        &self,
        ctx: &Context,
        number: u64,
        page: PaginationParams,
    ) -> GitHubResult<(Vec<Event>, Response)> {
        let path = format!("repos/{}/{}/issues/{}/events", self.owner, self.repo, number);
        let request = self.client.new_page_request(ctx, Method::GET, &path, page)?;
        self.client.send_json(request).await
    }
}
