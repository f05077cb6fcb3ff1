//! Pagination handling for GitHub API.

use reqwest::header::{HeaderMap, LINK};
use serde::Serialize;
use std::fmt;

/// Largest page size the API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Named link to another page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The first page.
    First,
    /// The previous page.
    Prev,
    /// The next page.
    Next,
    /// The last page.
    Last,
}

impl Relation {
    /// Parses a `rel` value. Unknown relations yield `None`.
    pub fn parse(rel: &str) -> Option<Self> {
        match rel {
            "first" => Some(Self::First),
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "last" => Some(Self::Last),
            _ => None,
        }
    }

    /// Gets the `rel` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Last => "last",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page numbers parsed from the Link header (RFC 8288).
///
/// Relation links are the authoritative navigation signal; they may disagree
/// with the page requested through [`PaginationParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pages {
    /// Page number of the first page.
    pub first: Option<u32>,
    /// Page number of the previous page.
    pub prev: Option<u32>,
    /// Page number of the next page.
    pub next: Option<u32>,
    /// Page number of the last page.
    pub last: Option<u32>,
}

impl Pages {
    /// Parses a Link header value.
    ///
    /// Entries with an unknown relation, a malformed target or no `page`
    /// query parameter are skipped.
    pub fn from_header(header_value: &str) -> Self {
        let mut pages = Self::default();

        for part in header_value.split(',') {
            let mut target = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(url) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                    target = Some(url);
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Relation::parse(value.trim_matches('"'));
                }
            }

            if let (Some(target), Some(rel)) = (target, rel) {
                if let Some(page) = extract_page_number(target) {
                    pages.set(rel, page);
                }
            }
        }

        pages
    }

    /// Parses pagination from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Gets the page number for a relation.
    pub fn get(&self, rel: Relation) -> Option<u32> {
        match rel {
            Relation::First => self.first,
            Relation::Prev => self.prev,
            Relation::Next => self.next,
            Relation::Last => self.last,
        }
    }

    fn set(&mut self, rel: Relation, page: u32) {
        match rel {
            Relation::First => self.first = Some(page),
            Relation::Prev => self.prev = Some(page),
            Relation::Next => self.next = Some(page),
            Relation::Last => self.last = Some(page),
        }
    }

    /// Returns true if no relation was found.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if there is a previous page.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// Pagination parameters for list requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Creates new pagination parameters. Both values are left to the server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number. Zero leaves it unspecified.
    pub fn page(mut self, page: u32) -> Self {
        self.page = (page >= 1).then_some(page);
        self
    }

    /// Sets items per page. Zero leaves it unspecified.
    pub fn per_page(mut self, per_page: u32) -> Self {
        // GitHub API limits to 100
        self.per_page = (per_page >= 1).then_some(per_page.min(MAX_PER_PAGE));
        self
    }

    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        params
    }
}

/// Extracts the `page` query parameter from a URL.
pub fn extract_page_number(url: &str) -> Option<u32> {
    url::Url::parse(url).ok().and_then(|u| {
        u.query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_link_header() {
        let header = r#"<https://x/?page=2>; rel="next", <https://x/?page=5>; rel="last""#;
        let pages = Pages::from_header(header);

        assert_eq!(
            pages,
            Pages {
                next: Some(2),
                last: Some(5),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_parse_full_link_header() {
        let header = r#"<https://api.github.com/repos?page=1>; rel="first", <https://api.github.com/repos?page=2>; rel="prev", <https://api.github.com/repos?page=4>; rel="next", <https://api.github.com/repos?page=5>; rel="last""#;
        let pages = Pages::from_header(header);

        assert_eq!(pages.get(Relation::First), Some(1));
        assert_eq!(pages.get(Relation::Prev), Some(2));
        assert_eq!(pages.get(Relation::Next), Some(4));
        assert_eq!(pages.get(Relation::Last), Some(5));
        assert!(pages.has_next());
        assert!(pages.has_prev());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let header = concat!(
            r#"<https://x/?page=3>; rel="next", "#,
            r#"https://x/?page=9; rel="last", "#,
            r#"<https://x/?per_page=10>; rel="prev", "#,
            r#"<https://x/?page=1>; rel="self", "#,
            r#"<not a url>; rel="first""#,
        );
        let pages = Pages::from_header(header);

        assert_eq!(
            pages,
            Pages {
                next: Some(3),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_no_link_header() {
        let pages = Pages::from_headers(&HeaderMap::new());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://api.github.com/user/repos?page=3&per_page=100>; rel="next""#),
        );

        assert_eq!(Pages::from_headers(&headers).next, Some(3));
    }

    #[test]
    fn test_pagination_params() {
        let params = PaginationParams::new().page(2).per_page(50);
        let query = params.to_query();

        assert!(query.contains(&("page".to_string(), "2".to_string())));
        assert!(query.contains(&("per_page".to_string(), "50".to_string())));
    }

    #[test]
    fn test_per_page_limit() {
        let params = PaginationParams::new().per_page(200);
        assert_eq!(params.per_page, Some(100));
    }

    #[test]
    fn test_zero_is_unspecified() {
        let params = PaginationParams::new().page(0).per_page(0);
        assert_eq!(params, PaginationParams::default());
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn test_extract_page_number() {
        assert_eq!(extract_page_number("https://x/?per_page=5&page=7"), Some(7));
        assert_eq!(extract_page_number("https://x/?page=abc"), None);
        assert_eq!(extract_page_number("relative?page=2"), None);
    }
}
