use crate::error::{Result, VersionManagerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "versionmanager.toml";

/// File name looked up in the user's config directory.
pub const USER_CONFIG_FILE: &str = ".versionmanager.toml";

/// Represents the complete file configuration for version-manager.
///
/// Holds defaults that shape prompts and pacing, release API endpoints and logging.
/// The per-run choices (branches, bump kind, ...) live in
/// [`WorkflowConfig`](crate::workflow::WorkflowConfig) instead.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_min_step_duration_ms() -> u64 {
    2000
}

fn default_tag_push_min_duration_ms() -> u64 {
    5000
}

/// Returns the default list of branches that are never deleted.
fn default_protected_branches() -> Vec<String> {
    vec![
        "master".to_string(),
        "main".to_string(),
        "develop".to_string(),
        "stage".to_string(),
    ]
}

/// Returns the default list of branches that receive pre-release tags.
fn default_prerelease_branches() -> Vec<String> {
    vec!["stage".to_string()]
}

/// Configuration for behavior customization.
///
/// Controls pacing and prompt policies without affecting the git operations themselves.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Minimum time a successful step stays on screen
    #[serde(default = "default_min_step_duration_ms")]
    pub min_step_duration_ms: u64,

    /// Minimum time for the combined tag and branch push
    #[serde(default = "default_tag_push_min_duration_ms")]
    pub tag_push_min_duration_ms: u64,

    #[serde(default = "default_protected_branches")]
    pub protected_branches: Vec<String>,

    #[serde(default = "default_prerelease_branches")]
    pub prerelease_branches: Vec<String>,
}

impl BehaviorConfig {
    pub fn min_step_duration(&self) -> Duration {
        Duration::from_millis(self.min_step_duration_ms)
    }

    pub fn tag_push_min_duration(&self) -> Duration {
        Duration::from_millis(self.tag_push_min_duration_ms)
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            min_step_duration_ms: default_min_step_duration_ms(),
            tag_push_min_duration_ms: default_tag_push_min_duration_ms(),
            protected_branches: default_protected_branches(),
            prerelease_branches: default_prerelease_branches(),
        }
    }
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_gitlab_api_url() -> String {
    "https://gitlab.com/api/v4".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Hosted release API endpoints.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_gitlab_api_url")]
    pub gitlab_api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            github_api_url: default_github_api_url(),
            gitlab_api_url: default_gitlab_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionmanager.toml` in current directory
/// 3. `.versionmanager.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(AppConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    match locate_config(config_path) {
        Some(path) => load_config_file(&path),
        None => Ok(AppConfig::default()),
    }
}

fn locate_config(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

fn load_config_file(path: &Path) -> Result<AppConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        VersionManagerError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&contents).map_err(|e| {
        VersionManagerError::config(format!("Invalid config file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.behavior.min_step_duration(), Duration::from_secs(2));
        assert_eq!(config.behavior.tag_push_min_duration(), Duration::from_secs(5));
        assert!(config.behavior.protected_branches.contains(&"main".to_string()));
        assert_eq!(config.behavior.prerelease_branches, vec!["stage"]);
        assert_eq!(config.release.github_api_url, "https://api.github.com");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[behavior]
min_step_duration_ms = 0
"#,
        )
        .unwrap();
        assert_eq!(config.behavior.min_step_duration_ms, 0);
        assert_eq!(config.behavior.tag_push_min_duration_ms, 5000);
        assert_eq!(config.release, ReleaseConfig::default());
    }
}
