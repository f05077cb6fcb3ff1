//! # GitHub REST Client
//!
//! A typed GitHub REST client with:
//! - Request construction against the API, upload and download base URLs
//! - Per-call cancellation and deadlines through [`Context`]
//! - Link header pagination and per-group rate limit tracking
//! - JSON decoding or raw streaming of response bodies
//! - A search query builder
//!
//! Each call is one round trip. Nothing is retried or throttled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_github_rest::{Context, GitHubClient, PaginationParams, Qualifier, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::builder()
//!         .token("ghp_xxxxxxxxxxxx")
//!         .build()?;
//!     let ctx = Context::background();
//!
//!     let (repo, _) = client.repo("octocat", "Hello-World").get(&ctx).await?;
//!     println!("{}", repo.full_name);
//!
//!     let query = SearchQuery::new()
//!         .include_keywords(["Fix"])
//!         .include_qualifiers([Qualifier::IsPr, Qualifier::IsOpen]);
//!     let (result, response) = client
//!         .search()
//!         .issues(&ctx, PaginationParams::new().per_page(10), None, None, &query)
//!         .await?;
//!     println!("{} matches, next page {:?}", result.total_count, response.pages.next);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod context;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;
pub mod scopes;

// HTTP client and transport
pub mod client;
pub mod request;
pub mod response;

// Header parsing
pub mod pagination;
pub mod rate;

// Search
pub mod query;

// API Services
pub mod services;

// Observability
pub mod observability;

// Re-exports for convenience
pub use auth::AuthMethod;
pub use client::{GitHubClient, GitHubClientBuilder};
pub use config::{GitHubConfig, GitHubConfigBuilder};
pub use context::{Context, ContextError};
pub use errors::{GitHubError, GitHubErrorKind, GitHubResult};
pub use pagination::{Pages, PaginationParams, Relation};
pub use query::{DateFilter, Qualifier, SearchOrder, SearchQuery, SearchSort};
pub use rate::{Rate, RateGroup};
pub use request::{ApiRequest, Purpose, RequestBuilder};
pub use response::{Destination, Response};
pub use scopes::Scope;
pub use types::*;
