//! Rate limit headers and the per-client rate cache.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Header carrying the request quota.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Header carrying the remaining requests.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the reset time in epoch seconds.
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// A partition of the API quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateGroup {
    /// Every endpoint without a dedicated pool.
    Core,
    /// The search endpoints.
    Search,
    /// The GraphQL endpoint.
    GraphQl,
}

impl RateGroup {
    /// Derives the group from a request path relative to the API base URL.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('/');
        let first = path.split(['/', '?']).next().unwrap_or_default();
        match first {
            "search" => Self::Search,
            "graphql" => Self::GraphQl,
            _ => Self::Core,
        }
    }

    /// Gets the group name as reported by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Search => "search",
            Self::GraphQl => "graphql",
        }
    }
}

impl fmt::Display for RateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last server-reported rate limit state for a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rate {
    /// Quota group the values belong to.
    pub group: RateGroup,
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the window.
    pub remaining: u32,
    /// Time when the window resets.
    pub reset: DateTime<Utc>,
}

impl Rate {
    /// Parses rate limit headers.
    ///
    /// Returns `None` unless the limit, remaining and reset headers are all
    /// present and well-formed.
    pub fn from_headers(headers: &HeaderMap, group: RateGroup) -> Option<Self> {
        let limit = header_value(headers, HEADER_LIMIT)?;
        let remaining = header_value(headers, HEADER_REMAINING)?;
        let reset_timestamp: i64 = header_value(headers, HEADER_RESET)?;
        let reset = DateTime::from_timestamp(reset_timestamp, 0)?;

        Some(Self {
            group,
            limit,
            remaining,
            reset,
        })
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Most recently observed rate per group.
///
/// This only records what the server said; it never delays a request.
#[derive(Debug, Default)]
pub struct RateCache {
    rates: RwLock<HashMap<RateGroup, Rate>>,
}

impl RateCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rate under its own group.
    pub fn record(&self, rate: Rate) {
        let mut rates = self.rates.write().unwrap_or_else(PoisonError::into_inner);
        rates.insert(rate.group, rate);
    }

    /// Gets the last rate seen for a group.
    pub fn get(&self, group: RateGroup) -> Option<Rate> {
        let rates = self.rates.read().unwrap_or_else(PoisonError::into_inner);
        rates.get(&group).cloned()
    }

    /// Gets a copy of every recorded rate.
    pub fn snapshot(&self) -> HashMap<RateGroup, Rate> {
        self.rates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;
    use test_case::test_case;

    fn headers(remaining: &str, limit: &str, reset: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_REMAINING, HeaderValue::from_str(remaining).unwrap());
        headers.insert(HEADER_LIMIT, HeaderValue::from_str(limit).unwrap());
        headers.insert(HEADER_RESET, HeaderValue::from_str(reset).unwrap());
        headers
    }

    #[test_case("/repos/octocat/Hello-World", RateGroup::Core ; "repository path")]
    #[test_case("search/issues", RateGroup::Search ; "search without slash")]
    #[test_case("/search/repositories?q=x", RateGroup::Search ; "search with query")]
    #[test_case("/searchable", RateGroup::Core ; "search prefix only")]
    #[test_case("/graphql", RateGroup::GraphQl ; "graphql")]
    #[test_case("/", RateGroup::Core ; "root")]
    fn test_group_from_path(path: &str, expected: RateGroup) {
        assert_eq!(RateGroup::from_path(path), expected);
    }

    #[test]
    fn test_parse_rate() {
        let reset = Utc.with_ymd_and_hms(2020, 10, 20, 20, 0, 0).unwrap();
        let headers = headers("10", "60", &reset.timestamp().to_string());

        let rate = Rate::from_headers(&headers, RateGroup::Core).unwrap();

        assert_eq!(
            rate,
            Rate {
                group: RateGroup::Core,
                limit: 60,
                remaining: 10,
                reset,
            }
        );
    }

    #[test]
    fn test_missing_headers() {
        assert!(Rate::from_headers(&HeaderMap::new(), RateGroup::Core).is_none());

        let mut partial = HeaderMap::new();
        partial.insert(HEADER_LIMIT, HeaderValue::from_static("60"));
        assert!(Rate::from_headers(&partial, RateGroup::Core).is_none());
    }

    #[test]
    fn test_malformed_headers() {
        let headers = headers("ten", "60", "1603224000");
        assert!(Rate::from_headers(&headers, RateGroup::Core).is_none());
    }

    #[test]
    fn test_cache_groups_are_independent() {
        let cache = RateCache::new();
        let reset = Utc.with_ymd_and_hms(2020, 10, 20, 20, 0, 0).unwrap();

        cache.record(Rate {
            group: RateGroup::Core,
            limit: 60,
            remaining: 59,
            reset,
        });
        cache.record(Rate {
            group: RateGroup::Search,
            limit: 10,
            remaining: 9,
            reset,
        });

        assert_eq!(cache.get(RateGroup::Core).unwrap().remaining, 59);
        assert_eq!(cache.get(RateGroup::Search).unwrap().remaining, 9);
        assert!(cache.get(RateGroup::GraphQl).is_none());
        assert_eq!(cache.snapshot().len(), 2);
    }
}
