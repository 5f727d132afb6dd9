//! Remote target configuration
//!
//! A [`RemoteConfig`] names the credentials and the repository branch the
//! collections live on. Client operations never hold on to a configuration:
//! they ask a [`ConfigSource`] for the current one before every request, so
//! a settings change takes effect on the next call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default API endpoint of the versioned-content service.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default branch documents are read from and committed to.
pub const DEFAULT_BRANCH: &str = "main";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and target location of the remote document store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Personal access token sent as a bearer token
    pub token: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch holding the data documents
    #[serde(default = "default_branch")]
    pub branch: String,
    /// API base URL, without a trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RemoteConfig {
    /// Create a configuration with the default branch, API base and timeout.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            branch: default_branch(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// A configuration with a blank required field is treated as absent.
    pub fn is_complete(&self) -> bool {
        [&self.token, &self.owner, &self.repo, &self.branch]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// URL of the repository itself, used by the connectivity probe.
    pub fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// URL of a document for writing.
    pub fn contents_url(&self, path: &str) -> String {
        format!("{}/contents/{}", self.repo_url(), path.trim_start_matches('/'))
    }

    /// URL of a document for reading, pinned to the configured branch.
    pub fn contents_url_at_ref(&self, path: &str) -> String {
        format!("{}?ref={}", self.contents_url(path), self.branch)
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let visible: String = self
            .token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if self.token.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("****{}", visible)
        }
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where a client looks up its configuration before every operation.
pub trait ConfigSource: Send + Sync {
    /// The current configuration, or `None` when none is usable.
    fn current(&self) -> Option<RemoteConfig>;
}

impl ConfigSource for RemoteConfig {
    fn current(&self) -> Option<RemoteConfig> {
        Some(self.clone()).filter(RemoteConfig::is_complete)
    }
}

impl ConfigSource for Option<RemoteConfig> {
    fn current(&self) -> Option<RemoteConfig> {
        self.clone().filter(RemoteConfig::is_complete)
    }
}
