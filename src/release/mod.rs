//! Hosted release publishing
//!
//! After a tag is created the workflow can publish a release for it on GitHub
//! or GitLab. [ReleasePublisher] is the seam the workflow calls;
//! [HttpReleasePublisher] talks to the real APIs.

pub mod github;
pub mod gitlab;

use crate::config::ReleaseConfig;
use crate::domain::Tag;
use crate::env::EnvValues;
use crate::error::{Result, VersionManagerError};
use reqwest::blocking::{Client, Response};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Hosting platform for releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoType {
    GitHub,
    GitLab,
}

impl RepoType {
    pub const ALL: [RepoType; 2] = [RepoType::GitHub, RepoType::GitLab];

    /// Host segment expected in the remote URL
    pub fn host(&self) -> &'static str {
        match self {
            RepoType::GitHub => "github.com",
            RepoType::GitLab => "gitlab.com",
        }
    }

    /// Environment entry holding the API token
    pub fn token_var(&self) -> &'static str {
        match self {
            RepoType::GitHub => "GITHUB_TOKEN",
            RepoType::GitLab => "GITLAB_TOKEN",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RepoType::GitHub => "GitHub",
            RepoType::GitLab => "GitLab",
        }
    }
}

impl FromStr for RepoType {
    type Err = VersionManagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(RepoType::GitHub),
            "gitlab" => Ok(RepoType::GitLab),
            other => Err(VersionManagerError::config(format!(
                "Unsupported repository type '{}': expected github or gitlab",
                other
            ))),
        }
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoType::GitHub => write!(f, "github"),
            RepoType::GitLab => write!(f, "gitlab"),
        }
    }
}

/// Everything needed to publish one release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    pub tag: Tag,
    pub title: String,
    pub notes: String,
    /// Branch the release points at
    pub target_branch: String,
    pub repo_type: RepoType,
    /// URL of the remote the tag was pushed to
    pub remote_url: String,
}

impl ReleaseRequest {
    /// Title to publish; falls back to `Release <tag>`
    pub fn effective_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Release {}", self.tag.release_name())
        } else {
            self.title.clone()
        }
    }
}

/// Publishes a hosted release for a tag
pub trait ReleasePublisher {
    fn publish(&self, request: &ReleaseRequest) -> Result<()>;
}

/// Extracts `owner/repo` (or a GitLab group path) from a remote URL.
///
/// Accepts `https://host/owner/repo(.git)` and `git@host:owner/repo(.git)`.
/// The host must match `repo_type`.
///
/// # Example
/// ```
/// use version_manager::release::{repository_slug, RepoType};
///
/// let slug = repository_slug("git@github.com:acme/widgets.git", RepoType::GitHub).unwrap();
/// assert_eq!(slug, "acme/widgets");
/// ```
pub fn repository_slug(remote_url: &str, repo_type: RepoType) -> Result<String> {
    let url = remote_url.trim();
    let url = url.strip_suffix('/').unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);

    let host = repo_type.host();
    let slug = [format!("{}/", host), format!("{}:", host)]
        .iter()
        .find_map(|segment| url.split_once(segment.as_str()).map(|(_, rest)| rest))
        .ok_or_else(|| {
            VersionManagerError::config(format!(
                "Unsupported repository URL '{}': expected a {} remote",
                remote_url,
                repo_type.display_name()
            ))
        })?;

    let slug = slug.trim_matches('/');
    if slug.is_empty() {
        return Err(VersionManagerError::config(format!(
            "Cannot extract the repository path from URL '{}'",
            remote_url
        )));
    }

    Ok(slug.to_string())
}

/// Release publisher calling the GitHub and GitLab REST APIs
pub struct HttpReleasePublisher {
    client: Client,
    config: ReleaseConfig,
    env: EnvValues,
}

impl HttpReleasePublisher {
    pub fn new(config: ReleaseConfig, env: EnvValues) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("version-manager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                VersionManagerError::config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(HttpReleasePublisher {
            client,
            config,
            env,
        })
    }

    /// Token for `repo_type`, or a configuration error naming the missing variable
    pub fn token(&self, repo_type: RepoType) -> Result<&str> {
        self.env.require(repo_type.token_var())
    }
}

impl ReleasePublisher for HttpReleasePublisher {
    fn publish(&self, request: &ReleaseRequest) -> Result<()> {
        let token = self.token(request.repo_type)?;
        let slug = repository_slug(&request.remote_url, request.repo_type)?;

        info!(
            tag = %request.tag,
            repo = %slug,
            platform = %request.repo_type,
            "creating release"
        );

        let response = match request.repo_type {
            RepoType::GitHub => {
                github::create_release(&self.client, &self.config.github_api_url, token, &slug, request)?
            }
            RepoType::GitLab => {
                gitlab::create_release(&self.client, &self.config.gitlab_api_url, token, &slug, request)?
            }
        };

        check_status(response)
    }
}

/// Any 2xx is success; otherwise the status and body become a network error
fn check_status(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        debug!(status = status.as_u16(), "release created");
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    Err(VersionManagerError::network(status.as_u16(), body))
}
