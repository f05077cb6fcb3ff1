//! GitHub Search API operations.

use crate::client::GitHubClient;
use crate::context::Context;
use crate::errors::GitHubResult;
use crate::pagination::PaginationParams;
use crate::query::{SearchOrder, SearchQuery, SearchSort};
use crate::request::Purpose;
use crate::response::Response;
use crate::types::{Issue, Repository, SearchResult, User};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Query parameters shared by the search endpoints.
#[derive(Debug, Serialize)]
struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'static str>,
    q: String,
}

/// Service for search operations.
///
/// Search calls are charged to the search rate group.
pub struct SearchService<'a> {
    client: &'a GitHubClient,
}

impl<'a> SearchService<'a> {
    /// Creates a new search service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Searches users.
    pub async fn users(
        &self,
        ctx: &Context,
        page: PaginationParams,
        sort: Option<SearchSort>,
        order: Option<SearchOrder>,
        query: &SearchQuery,
    ) -> GitHubResult<(SearchResult<User>, Response)> {
        self.search(ctx, "search/users", page, sort, order, query)
            .await
    }

    /// Searches repositories.
    pub async fn repos(
        &self,
        ctx: &Context,
        page: PaginationParams,
        sort: Option<SearchSort>,
        order: Option<SearchOrder>,
        query: &SearchQuery,
    ) -> GitHubResult<(SearchResult<Repository>, Response)> {
        self.search(ctx, "search/repositories", page, sort, order, query)
            .await
    }

    /// Searches issues and pull requests.
    pub async fn issues(
        &self,
        ctx: &Context,
        page: PaginationParams,
        sort: Option<SearchSort>,
        order: Option<SearchOrder>,
        query: &SearchQuery,
    ) -> GitHubResult<(SearchResult<Issue>, Response)> {
        self.search(ctx, "search/issues", page, sort, order, query)
            .await
    }

    async fn search<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        page: PaginationParams,
        sort: Option<SearchSort>,
        order: Option<SearchOrder>,
        query: &SearchQuery,
    ) -> GitHubResult<(SearchResult<T>, Response)> {
        let params = SearchParams {
            sort: sort.map(|s| s.as_str()),
            order: order.map(|o| o.as_str()),
            q: query.to_string(),
        };

        let request = self
            .client
            .request(Purpose::Api, Method::GET, path)
            .context(ctx)
            .page(page)
            .query(&params)
            .build()?;

        self.client.send_json(request).await
    }
}
