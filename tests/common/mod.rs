//! Shared helpers for the WireMock integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use integrations_github_rest::GitHubClient;
use wiremock::{MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Epoch seconds of 2020-10-20T20:00:00Z.
pub const RESET_EPOCH: i64 = 1_603_224_000;

pub fn reset_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 10, 20, 20, 0, 0).unwrap()
}

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builds a client whose API, upload and download base URLs all point at
/// the mock server.
pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::builder()
        .base_url(server.uri())
        .token(TOKEN)
        .build()
        .expect("client should build")
}

/// Adds rate limit headers to a response.
pub fn with_rate(template: ResponseTemplate, remaining: u32, limit: u32) -> ResponseTemplate {
    template
        .insert_header("X-RateLimit-Remaining", remaining.to_string().as_str())
        .insert_header("X-RateLimit-Limit", limit.to_string().as_str())
        .insert_header("X-RateLimit-Reset", RESET_EPOCH.to_string().as_str())
}

/// Adds a Link header with `next` and `last` relations.
pub fn with_links(template: ResponseTemplate, next: u32, last: u32) -> ResponseTemplate {
    template.insert_header(
        "Link",
        format!(
            r#"<https://api.github.com/resource?page={}>; rel="next", <https://api.github.com/resource?page={}>; rel="last""#,
            next, last
        )
        .as_str(),
    )
}

/// A JSON success response carrying rate and pagination headers.
pub fn json_ok(body: serde_json::Value) -> ResponseTemplate {
    with_links(with_rate(ResponseTemplate::new(200).set_body_json(body), 59, 60), 2, 5)
}
