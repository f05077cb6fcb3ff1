//! Search query builder.
//!
//! A [`SearchQuery`] renders to the single `q` parameter of the search
//! endpoints: quoted keywords first, qualifiers second, each group in the
//! order it was added.

use chrono::{DateTime, NaiveDate, TimeZone};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A search qualifier token (`key:value`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `type:user`
    TypeUser,
    /// `type:org`
    TypeOrg,
    /// `type:pr`
    TypePr,
    /// `type:issue`
    TypeIssue,
    /// `is:pr`
    IsPr,
    /// `is:issue`
    IsIssue,
    /// `in:login`
    InLogin,
    /// `in:email`
    InEmail,
    /// `in:name`
    InName,
    /// `in:description`
    InDescription,
    /// `in:readme`
    InReadme,
    /// `in:title`
    InTitle,
    /// `in:body`
    InBody,
    /// `in:comments`
    InComments,
    /// `state:open`
    StateOpen,
    /// `state:closed`
    StateClosed,
    /// `is:open`
    IsOpen,
    /// `is:closed`
    IsClosed,
    /// `is:public`
    IsPublic,
    /// `is:internal`
    IsInternal,
    /// `is:private`
    IsPrivate,
    /// `status:pending`
    StatusPending,
    /// `status:success`
    StatusSuccess,
    /// `status:failure`
    StatusFailure,
    /// `archived:true`
    ArchivedTrue,
    /// `archived:false`
    ArchivedFalse,
    /// `draft:true`
    DraftTrue,
    /// `draft:false`
    DraftFalse,
    /// `is:merged`
    IsMerged,
    /// `is:unmerged`
    IsUnmerged,
    /// `is:locked`
    IsLocked,
    /// `is:unlocked`
    IsUnlocked,
    /// A pre-formatted token, produced by the parametrized constructors.
    Token(String),
}

const FIXED: &[Qualifier] = &[
    Qualifier::TypeUser,
    Qualifier::TypeOrg,
    Qualifier::TypePr,
    Qualifier::TypeIssue,
    Qualifier::IsPr,
    Qualifier::IsIssue,
    Qualifier::InLogin,
    Qualifier::InEmail,
    Qualifier::InName,
    Qualifier::InDescription,
    Qualifier::InReadme,
    Qualifier::InTitle,
    Qualifier::InBody,
    Qualifier::InComments,
    Qualifier::StateOpen,
    Qualifier::StateClosed,
    Qualifier::IsOpen,
    Qualifier::IsClosed,
    Qualifier::IsPublic,
    Qualifier::IsInternal,
    Qualifier::IsPrivate,
    Qualifier::StatusPending,
    Qualifier::StatusSuccess,
    Qualifier::StatusFailure,
    Qualifier::ArchivedTrue,
    Qualifier::ArchivedFalse,
    Qualifier::DraftTrue,
    Qualifier::DraftFalse,
    Qualifier::IsMerged,
    Qualifier::IsUnmerged,
    Qualifier::IsLocked,
    Qualifier::IsUnlocked,
];

impl Qualifier {
    /// Gets the token text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::TypeUser => "type:user",
            Self::TypeOrg => "type:org",
            Self::TypePr => "type:pr",
            Self::TypeIssue => "type:issue",
            Self::IsPr => "is:pr",
            Self::IsIssue => "is:issue",
            Self::InLogin => "in:login",
            Self::InEmail => "in:email",
            Self::InName => "in:name",
            Self::InDescription => "in:description",
            Self::InReadme => "in:readme",
            Self::InTitle => "in:title",
            Self::InBody => "in:body",
            Self::InComments => "in:comments",
            Self::StateOpen => "state:open",
            Self::StateClosed => "state:closed",
            Self::IsOpen => "is:open",
            Self::IsClosed => "is:closed",
            Self::IsPublic => "is:public",
            Self::IsInternal => "is:internal",
            Self::IsPrivate => "is:private",
            Self::StatusPending => "status:pending",
            Self::StatusSuccess => "status:success",
            Self::StatusFailure => "status:failure",
            Self::ArchivedTrue => "archived:true",
            Self::ArchivedFalse => "archived:false",
            Self::DraftTrue => "draft:true",
            Self::DraftFalse => "draft:false",
            Self::IsMerged => "is:merged",
            Self::IsUnmerged => "is:unmerged",
            Self::IsLocked => "is:locked",
            Self::IsUnlocked => "is:unlocked",
            Self::Token(token) => token,
        }
    }

    /// Matches a user.
    pub fn user(username: &str) -> Self {
        Self::Token(format!("user:{}", username))
    }

    /// Matches an organization.
    pub fn org(org: &str) -> Self {
        Self::Token(format!("org:{}", org))
    }

    /// Matches a repository.
    pub fn repo(owner: &str, name: &str) -> Self {
        Self::Token(format!("repo:{}/{}", owner, name))
    }

    /// Matches an author.
    pub fn author(username: &str) -> Self {
        Self::Token(format!("author:{}", username))
    }

    /// Matches an app author.
    pub fn author_app(app: &str) -> Self {
        Self::Token(format!("author:app/{}", app))
    }

    /// Matches an assignee.
    pub fn assignee(username: &str) -> Self {
        Self::Token(format!("assignee:{}", username))
    }

    /// Matches a label. The label is quoted.
    pub fn label(label: &str) -> Self {
        Self::Token(format!("label:{}", quote(label)))
    }

    /// Matches a milestone. The milestone is quoted.
    pub fn milestone(milestone: &str) -> Self {
        Self::Token(format!("milestone:{}", quote(milestone)))
    }

    /// Matches a project board. The board is quoted.
    pub fn project(board: &str) -> Self {
        Self::Token(format!("project:{}", quote(board)))
    }

    /// Matches a repository project board.
    pub fn repo_project(owner: &str, name: &str, board: &str) -> Self {
        Self::Token(format!("project:{}/{}/{}", owner, name, board))
    }

    /// Matches a head branch.
    pub fn head(branch: &str) -> Self {
        Self::Token(format!("head:{}", branch))
    }

    /// Matches a base branch.
    pub fn base(branch: &str) -> Self {
        Self::Token(format!("base:{}", branch))
    }

    /// Matches a language.
    pub fn language(language: &str) -> Self {
        Self::Token(format!("language:{}", language))
    }

    /// Matches a topic.
    pub fn topic(topic: &str) -> Self {
        Self::Token(format!("topic:{}", topic))
    }

    /// Matches by creation date.
    pub fn created(filter: DateFilter) -> Self {
        Self::Token(format!("created:{}", filter))
    }

    /// Matches by last update date.
    pub fn updated(filter: DateFilter) -> Self {
        Self::Token(format!("updated:{}", filter))
    }

    /// Matches by close date.
    pub fn closed(filter: DateFilter) -> Self {
        Self::Token(format!("closed:{}", filter))
    }

    /// Matches pull requests by merge date.
    pub fn merged(filter: DateFilter) -> Self {
        Self::Token(format!("merged:{}", filter))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Qualifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FIXED
            .iter()
            .find(|q| q.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Self::Token(s.to_string())))
    }
}

impl From<&str> for Qualifier {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(q) => q,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Qualifier {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// Wraps `s` in double quotes.
///
/// Only `"`, `\` and control characters are escaped; every other character,
/// combining marks included, is kept as is.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A date condition for the date qualifiers.
///
/// Dates are taken in the offset of the instant they were built from; no
/// time zone appears in the rendered token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// On the date.
    On(NaiveDate),
    /// After the date.
    After(NaiveDate),
    /// On or after the date.
    OnOrAfter(NaiveDate),
    /// Before the date.
    Before(NaiveDate),
    /// On or before the date.
    OnOrBefore(NaiveDate),
    /// From the first date to the second, inclusive.
    Between(NaiveDate, NaiveDate),
}

impl DateFilter {
    /// Matches the calendar date of `t`.
    pub fn on<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::On(t.date_naive())
    }

    /// Matches dates after `t`.
    pub fn after<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::After(t.date_naive())
    }

    /// Matches dates on or after `t`.
    pub fn on_or_after<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::OnOrAfter(t.date_naive())
    }

    /// Matches dates before `t`.
    pub fn before<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::Before(t.date_naive())
    }

    /// Matches dates on or before `t`.
    pub fn on_or_before<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::OnOrBefore(t.date_naive())
    }

    /// Matches dates from `from` to `to`.
    pub fn between<Tz1: TimeZone, Tz2: TimeZone>(from: &DateTime<Tz1>, to: &DateTime<Tz2>) -> Self {
        Self::Between(from.date_naive(), to.date_naive())
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::After(d) => write!(f, ">{}", d.format(DATE_FORMAT)),
            Self::OnOrAfter(d) => write!(f, ">={}", d.format(DATE_FORMAT)),
            Self::Before(d) => write!(f, "<{}", d.format(DATE_FORMAT)),
            Self::OnOrBefore(d) => write!(f, "<={}", d.format(DATE_FORMAT)),
            Self::Between(from, to) => {
                write!(f, "{}..{}", from.format(DATE_FORMAT), to.format(DATE_FORMAT))
            }
        }
    }
}

/// Search query made of keywords and qualifiers.
///
/// Nothing is normalized or deduplicated; including and excluding the same
/// qualifier renders both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: Vec<String>,
    qualifiers: Vec<String>,
}

impl SearchQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds keywords that must match. Each is quoted.
    pub fn include_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords
            .extend(keywords.into_iter().map(|k| quote(k.as_ref())));
        self
    }

    /// Adds keywords that must not match, rendered as `NOT "keyword"`.
    pub fn exclude_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords
            .extend(keywords.into_iter().map(|k| format!("NOT {}", quote(k.as_ref()))));
        self
    }

    /// Adds qualifiers that must match.
    pub fn include_qualifiers<I, Q>(mut self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Qualifier>,
    {
        self.qualifiers
            .extend(qualifiers.into_iter().map(|q| q.into().to_string()));
        self
    }

    /// Adds qualifiers that must not match, rendered with a leading `-`.
    pub fn exclude_qualifiers<I, Q>(mut self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Qualifier>,
    {
        self.qualifiers
            .extend(qualifiers.into_iter().map(|q| format!("-{}", q.into())));
        self
    }

    /// Returns true if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.qualifiers.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<&str> = self
            .keywords
            .iter()
            .chain(&self.qualifiers)
            .map(String::as_str)
            .collect();
        f.write_str(&terms.join(" "))
    }
}

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    /// Users by follower count.
    Followers,
    /// Users by repository count.
    Repositories,
    /// Users by join date.
    Joined,
    /// Repositories by stars.
    Stars,
    /// Repositories by forks.
    Forks,
    /// Repositories, issues and pull requests by last update.
    Updated,
    /// Issues and pull requests by creation.
    Created,
    /// Issues and pull requests by comment count.
    Comments,
    /// Issues and pull requests by reaction count.
    Reactions,
    /// Issues and pull requests by interaction count.
    Interactions,
}

impl SearchSort {
    /// Gets the `sort` parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Repositories => "repositories",
            Self::Joined => "joined",
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Updated => "updated",
            Self::Created => "created",
            Self::Comments => "comments",
            Self::Reactions => "reactions",
            Self::Interactions => "interactions",
        }
    }
}

impl fmt::Display for SearchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SearchOrder {
    /// Gets the `order` parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
