//! Core data types for GitHub API.
//!
//! Fields the server may omit or send as `null` default instead of failing
//! the decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GitHub user (minimal representation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Username (login).
    pub login: String,
    /// User type (User, Organization, Bot).
    #[serde(rename = "type")]
    pub user_type: String,
    /// Display name.
    pub name: Option<String>,
    /// Public email.
    pub email: Option<String>,
    /// Site admin flag.
    pub site_admin: bool,
    /// API URL.
    pub url: String,
    /// Profile URL.
    pub html_url: String,
}

/// GitHub repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Repository ID.
    pub id: u64,
    /// Repository name.
    pub name: String,
    /// Full name (owner/repo).
    pub full_name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Topics.
    pub topics: Vec<String>,
    /// Whether the repository is private.
    pub private: bool,
    /// Whether the repository is a fork.
    pub fork: bool,
    /// Whether the repository is archived.
    pub archived: bool,
    /// Whether the repository is disabled.
    pub disabled: bool,
    /// Visibility (public, private, internal).
    pub visibility: Option<String>,
    /// Default branch.
    pub default_branch: String,
    /// Owner information.
    pub owner: User,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Last push timestamp.
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Repository permission level of a collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// No access.
    #[default]
    None,
    /// View and discuss.
    Read,
    /// Manage issues and pull requests without write access.
    Triage,
    /// Push to the repository.
    Write,
    /// Manage the repository without destructive actions.
    Maintain,
    /// Full access.
    Admin,
}

impl Permission {
    /// Gets the permission name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Triage => "triage",
            Self::Write => "write",
            Self::Maintain => "maintain",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git object reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hash {
    /// Object SHA.
    pub sha: String,
    /// API URL.
    pub url: String,
}

/// Git author or committer signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    /// Name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Timestamp.
    pub date: Option<DateTime<Utc>>,
}

/// Git commit data inside a repository commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommit {
    /// Commit message.
    pub message: String,
    /// Author signature.
    pub author: Signature,
    /// Committer signature.
    pub committer: Signature,
    /// Tree object.
    pub tree: Hash,
    /// API URL.
    pub url: String,
}

/// Repository commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    /// Commit SHA.
    pub sha: String,
    /// Git commit data.
    pub commit: RawCommit,
    /// GitHub author, absent for unknown emails.
    pub author: Option<User>,
    /// GitHub committer, absent for unknown emails.
    pub committer: Option<User>,
    /// Parent commits.
    pub parents: Vec<Hash>,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
}

/// GitHub branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Whether the branch is protected.
    pub protected: bool,
    /// Head commit.
    pub commit: Commit,
}

/// GitHub tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tagged commit.
    pub commit: Hash,
}

/// Issue label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    /// Label ID.
    pub id: u64,
    /// Label name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Color (hex without #).
    pub color: String,
    /// Whether this is a default label.
    pub default: bool,
    /// API URL.
    pub url: String,
}

/// Issue milestone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    /// Milestone ID.
    pub id: u64,
    /// Milestone number.
    pub number: u64,
    /// State (open or closed).
    pub state: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Creator.
    pub creator: Option<User>,
    /// Open issue count.
    pub open_issues: u32,
    /// Closed issue count.
    pub closed_issues: u32,
    /// Due date.
    pub due_on: Option<DateTime<Utc>>,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Labels URL.
    pub labels_url: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Links present on an issue that is a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullUrls {
    /// API URL of the pull request.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Diff URL.
    pub diff_url: String,
    /// Patch URL.
    pub patch_url: String,
}

/// GitHub issue. Pull requests are listed as issues too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Issue ID.
    pub id: u64,
    /// Issue number.
    pub number: u64,
    /// State (open or closed).
    pub state: String,
    /// Whether the conversation is locked.
    pub locked: bool,
    /// Title.
    pub title: String,
    /// Body.
    pub body: Option<String>,
    /// Author.
    pub user: User,
    /// Labels.
    pub labels: Vec<Label>,
    /// Milestone.
    pub milestone: Option<Milestone>,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Labels URL.
    pub labels_url: String,
    /// Set when the issue is a pull request.
    pub pull_request: Option<PullUrls>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Returns true if the issue is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Issue timeline event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event ID.
    pub id: u64,
    /// Event name (closed, labeled, ...).
    pub event: String,
    /// Related commit.
    pub commit_id: Option<String>,
    /// Actor.
    pub actor: Option<User>,
    /// API URL.
    pub url: String,
    /// Related commit URL.
    pub commit_url: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Issue or pull request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open.
    Open,
    /// Closed.
    Closed,
}

/// State filter for list calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    /// Open only.
    Open,
    /// Closed only.
    Closed,
    /// Both.
    All,
}

impl StateFilter {
    /// Gets the `state` parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Filter for listing issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuesFilter {
    /// State filter. Server default is open.
    pub state: Option<StateFilter>,
    /// Only issues updated at or after this time.
    pub since: Option<DateTime<Utc>>,
}

/// Filter for listing pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullsFilter {
    /// State filter. Server default is open.
    pub state: Option<StateFilter>,
}

/// Head or base of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullBranch {
    /// Label (owner:branch).
    pub label: String,
    /// Branch name.
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit SHA.
    pub sha: String,
    /// Owner.
    pub user: Option<User>,
    /// Repository, absent when it was deleted.
    pub repo: Option<Repository>,
}

/// GitHub pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pull {
    /// Pull request ID.
    pub id: u64,
    /// Pull request number.
    pub number: u64,
    /// State (open or closed).
    pub state: String,
    /// Whether this is a draft.
    pub draft: bool,
    /// Whether the conversation is locked.
    pub locked: bool,
    /// Title.
    pub title: String,
    /// Body.
    pub body: Option<String>,
    /// Author.
    pub user: User,
    /// Labels.
    pub labels: Vec<Label>,
    /// Milestone.
    pub milestone: Option<Milestone>,
    /// Base branch.
    pub base: PullBranch,
    /// Head branch.
    pub head: PullBranch,
    /// Whether it was merged.
    pub merged: bool,
    /// Whether it can be merged, when computed.
    pub mergeable: Option<bool>,
    /// Whether it can be rebased, when computed.
    pub rebaseable: Option<bool>,
    /// Merger.
    pub merged_by: Option<User>,
    /// Merge commit SHA.
    pub merge_commit_sha: Option<String>,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Diff URL.
    pub diff_url: String,
    /// Patch URL.
    pub patch_url: String,
    /// Issue URL.
    pub issue_url: String,
    /// Commits URL.
    pub commits_url: String,
    /// Statuses URL.
    pub statuses_url: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatePullParams {
    /// Title.
    pub title: String,
    /// Head branch (`branch` or `owner:branch`).
    pub head: String,
    /// Base branch.
    pub base: String,
    /// Body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Open as draft.
    pub draft: bool,
}

/// Parameters for updating a pull request. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdatePullParams {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Base branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// State.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

/// Parameters for creating or updating a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseParams {
    /// Release name.
    pub name: String,
    /// Tag name.
    pub tag_name: String,
    /// Commitish the tag is created from.
    #[serde(rename = "target_commitish", skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Draft release.
    pub draft: bool,
    /// Prerelease.
    pub prerelease: bool,
    /// Release notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// GitHub release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    /// Release ID.
    pub id: u64,
    /// Release name.
    pub name: Option<String>,
    /// Tag name.
    pub tag_name: String,
    /// Target commitish.
    #[serde(rename = "target_commitish")]
    pub target: String,
    /// Draft release.
    pub draft: bool,
    /// Prerelease.
    pub prerelease: bool,
    /// Release notes.
    pub body: Option<String>,
    /// API URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Assets URL.
    pub assets_url: String,
    /// Upload URL template.
    pub upload_url: String,
    /// Tarball URL.
    pub tarball_url: Option<String>,
    /// Zipball URL.
    pub zipball_url: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Publish timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Author.
    pub author: Option<User>,
    /// Assets.
    pub assets: Vec<ReleaseAsset>,
}

/// Release asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseAsset {
    /// Asset ID.
    pub id: u64,
    /// File name.
    pub name: String,
    /// Label.
    pub label: Option<String>,
    /// State (uploaded, open).
    pub state: String,
    /// Content type.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Download count.
    pub download_count: u64,
    /// API URL.
    pub url: String,
    /// Browser download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Uploader.
    pub uploader: Option<User>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Total matches across all pages.
    pub total_count: u64,
    /// Whether the search timed out before finding every match.
    #[serde(default)]
    pub incomplete_results: bool,
    /// Matches on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
