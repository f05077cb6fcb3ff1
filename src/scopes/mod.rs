//! OAuth scopes reported by the API.

use std::fmt;

/// Header listing the scopes granted to the credential.
pub const HEADER_OAUTH_SCOPES: &str = "x-oauth-scopes";

/// An OAuth scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Full control of private repositories.
    Repo,
    /// Access commit status.
    RepoStatus,
    /// Access deployment status.
    RepoDeployment,
    /// Access public repositories.
    PublicRepo,
    /// Access repository invitations.
    RepoInvite,
    /// Read and write security events.
    SecurityEvents,
    /// Full control of repository hooks.
    AdminRepoHook,
    /// Write repository hooks.
    WriteRepoHook,
    /// Read repository hooks.
    ReadRepoHook,
    /// Full control of orgs and teams.
    AdminOrg,
    /// Read and write org and team membership.
    WriteOrg,
    /// Read org and team membership.
    ReadOrg,
    /// Update all user data.
    User,
    /// Read all user profile data.
    ReadUser,
    /// Access user email addresses.
    UserEmail,
    /// Follow and unfollow users.
    UserFollow,
    /// Delete repositories.
    DeleteRepo,
    /// Upload packages.
    WritePackages,
    /// Download packages.
    ReadPackages,
    /// Create gists.
    Gist,
    /// Access notifications.
    Notifications,
    /// Update GitHub Action workflows.
    Workflow,
}

impl Scope {
    /// Gets the scope name as sent by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repo => "repo",
            Self::RepoStatus => "repo:status",
            Self::RepoDeployment => "repo_deployment",
            Self::PublicRepo => "public_repo",
            Self::RepoInvite => "repo:invite",
            Self::SecurityEvents => "security_events",
            Self::AdminRepoHook => "admin:repo_hook",
            Self::WriteRepoHook => "write:repo_hook",
            Self::ReadRepoHook => "read:repo_hook",
            Self::AdminOrg => "admin:org",
            Self::WriteOrg => "write:org",
            Self::ReadOrg => "read:org",
            Self::User => "user",
            Self::ReadUser => "read:user",
            Self::UserEmail => "user:email",
            Self::UserFollow => "user:follow",
            Self::DeleteRepo => "delete_repo",
            Self::WritePackages => "write:packages",
            Self::ReadPackages => "read:packages",
            Self::Gist => "gist",
            Self::Notifications => "notifications",
            Self::Workflow => "workflow",
        }
    }

    /// Gets the broader scope that also grants this one.
    fn parent(&self) -> Option<Scope> {
        match self {
            Self::RepoStatus
            | Self::RepoDeployment
            | Self::PublicRepo
            | Self::RepoInvite
            | Self::SecurityEvents => Some(Self::Repo),
            Self::WriteRepoHook => Some(Self::AdminRepoHook),
            Self::ReadRepoHook => Some(Self::WriteRepoHook),
            Self::WriteOrg => Some(Self::AdminOrg),
            Self::ReadOrg => Some(Self::WriteOrg),
            Self::ReadUser | Self::UserEmail | Self::UserFollow => Some(Self::User),
            Self::ReadPackages => Some(Self::WritePackages),
            _ => None,
        }
    }

    /// Returns true if `granted` includes this scope directly or through a
    /// broader scope.
    pub fn is_granted_by(&self, granted: &[&str]) -> bool {
        let mut scope = Some(*self);
        while let Some(s) = scope {
            if granted.contains(&s.as_str()) {
                return true;
            }
            scope = s.parent();
        }
        false
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits an `X-OAuth-Scopes` header value.
pub fn parse_scopes(header_value: &str) -> Vec<&str> {
    header_value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Returns the scopes in `required` that `granted` does not cover.
pub fn missing_scopes(granted: &[&str], required: &[Scope]) -> Vec<Scope> {
    required
        .iter()
        .filter(|scope| !scope.is_granted_by(granted))
        .copied()
        .collect()
}
