//! Environment values for the release publisher.
//!
//! Values from a `.env` file are merged with the process environment into an
//! explicit map. The process environment itself is never modified.

use crate::error::{Result, VersionManagerError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `.env` locations tried when no file is given explicitly.
pub const DEFAULT_ENV_FILES: [&str; 2] = [".env", "../.env"];

/// Snapshot of environment entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvValues {
    values: HashMap<String, String>,
}

impl EnvValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value for `key`; blank values count as missing
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Value for `key`, or a configuration error naming it
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            VersionManagerError::config(format!(
                "Access token not found. Set the {} environment variable or add it to a .env file",
                key
            ))
        })
    }

    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, entries: I) {
        self.values.extend(entries);
    }
}

/// Loads environment values once at start-up.
///
/// Reads `env_file` if given (a missing or unreadable explicit file is an
/// error), otherwise the first existing file among [DEFAULT_ENV_FILES]. The
/// process environment is layered on top, so real variables win over file
/// entries.
pub fn load_env_values(env_file: Option<&Path>) -> Result<EnvValues> {
    let mut values = EnvValues::new();

    let file = match env_file {
        Some(path) => Some(path.to_path_buf()),
        None => DEFAULT_ENV_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    };

    if let Some(path) = file {
        values.extend(read_env_file(&path)?);
    }

    values.extend(std::env::vars());
    Ok(values)
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>> {
    debug!(path = %path.display(), "loading env file");

    let iter = dotenv::from_path_iter(path).map_err(|e| {
        VersionManagerError::config(format!("Cannot read env file {}: {}", path.display(), e))
    })?;

    iter.map(|entry| {
        entry.map_err(|e| {
            VersionManagerError::config(format!("Invalid env file {}: {}", path.display(), e))
        })
    })
    .collect()
}
