//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations the
//! release workflow needs, and a second seam below it for the process that
//! actually runs the commands.
//!
//! # Overview
//!
//! - [Repository] is the facade the workflow talks to: one method per git verb.
//! - [CommandExecutor] runs a program with arguments and captures its output.
//!
//! The concrete implementations include:
//!
//! - [repository::GitCli]: the facade, translating each verb into a `git` invocation
//! - [repository::SystemExecutor]: spawns real processes
//! - [mock::ScriptedExecutor]: answers from a table of canned results, for tests
//!
//! # Usage
//!
//! ```rust
//! # use version_manager::git::{GitCli, Repository, ScriptedExecutor};
//! let executor = ScriptedExecutor::new()
//!     .on_success("git checkout main", "Switched to branch 'main'")
//!     .on_success("git merge feature", "Fast-forward");
//! let repo = GitCli::new(executor);
//!
//! repo.checkout("main").unwrap();
//! repo.merge("feature").unwrap();
//! ```

pub mod mock;
pub mod repository;

pub use mock::ScriptedExecutor;
pub use repository::{GitCli, SystemExecutor};

use crate::error::Result;

/// Captured result of running an external program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the program exited with status zero
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        CommandOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed; what error messages carry
    pub fn combined(&self) -> String {
        let mut combined = String::new();
        combined.push_str(self.stdout.trim_end());
        if !self.stdout.trim().is_empty() && !self.stderr.trim().is_empty() {
            combined.push('\n');
        }
        combined.push_str(self.stderr.trim_end());
        combined.trim().to_string()
    }
}

/// Runs external programs
///
/// A spawn failure is an `Err`; a nonzero exit is an `Ok` output with
/// `success == false`. Deciding what a nonzero exit means is up to the caller.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        (**self).execute(program, args)
    }
}

/// Repository command facade
///
/// One operation per git verb used by the release workflow. Every operation
/// is a single blocking call; any failure is reported as
/// [crate::error::VersionManagerError::Command] carrying the command line and
/// its combined output.
///
/// ## Implementations
///
/// - [GitCli](repository::GitCli): runs the `git` executable through a [CommandExecutor]
pub trait Repository: Send + Sync {
    /// Switch the working tree to `branch`
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Merge `source_branch` into the currently checked-out branch
    ///
    /// Conflicts are reported as errors; no resolution is attempted.
    fn merge(&self, source_branch: &str) -> Result<()>;

    /// Push `branch` to `remote`
    fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push `tag` to `remote`
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// Force-delete a local branch
    fn delete_branch(&self, branch: &str) -> Result<()>;

    /// Create an annotated tag at HEAD
    fn create_tag(&self, tag: &str, message: &str) -> Result<()>;

    /// Most recent tag reachable from HEAD
    ///
    /// Fails when the repository has no tags; callers that only need to know
    /// "is there a previous tag" treat that failure as `None`.
    fn latest_tag(&self) -> Result<String>;

    /// Local branch names, current-branch marker stripped
    fn list_branches(&self) -> Result<Vec<String>>;

    /// Configured remote names
    fn list_remotes(&self) -> Result<Vec<String>>;

    /// Fetch URL configured for `remote`
    fn remote_url(&self, remote: &str) -> Result<String>;
}
