use crate::error::{Result, VersionManagerError};
use crate::git::{CommandExecutor, CommandOutput, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const GIT: &str = "git";

/// Spawns real processes, optionally inside a fixed working directory
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    working_dir: Option<PathBuf>,
}

impl SystemExecutor {
    /// Run commands in the current working directory
    pub fn new() -> Self {
        SystemExecutor { working_dir: None }
    }

    /// Run commands inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        SystemExecutor {
            working_dir: Some(dir.as_ref().to_path_buf()),
        }
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Repository facade backed by the `git` executable
pub struct GitCli<E: CommandExecutor> {
    executor: E,
}

impl GitCli<SystemExecutor> {
    /// Facade over the repository containing the current directory
    pub fn system() -> Self {
        GitCli::new(SystemExecutor::new())
    }
}

impl<E: CommandExecutor> GitCli<E> {
    pub fn new(executor: E) -> Self {
        GitCli { executor }
    }

    /// The executor commands are sent through
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `git <args>`; a spawn failure or nonzero exit becomes a command error
    fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        let command_line = format!("{} {}", GIT, args.join(" "));
        debug!(command = %command_line, "running git");

        let output = self
            .executor
            .execute(GIT, args)
            .map_err(|e| VersionManagerError::command(&command_line, e.to_string()))?;

        if !output.success {
            debug!(command = %command_line, output = %output.combined(), "git failed");
            return Err(VersionManagerError::command(command_line, output.combined()));
        }

        Ok(output)
    }

    fn git_lines(&self, args: &[&str]) -> Result<Vec<String>> {
        let output = self.git(args)?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl<E: CommandExecutor> Repository for GitCli<E> {
    fn checkout(&self, branch: &str) -> Result<()> {
        self.git(&["checkout", branch]).map(|_| ())
    }

    fn merge(&self, source_branch: &str) -> Result<()> {
        self.git(&["merge", source_branch]).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["push", remote, branch]).map(|_| ())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.git(&["push", remote, tag]).map(|_| ())
    }

    fn delete_branch(&self, branch: &str) -> Result<()> {
        self.git(&["branch", "-D", branch]).map(|_| ())
    }

    fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.git(&["tag", "-a", tag, "-m", message]).map(|_| ())
    }

    fn latest_tag(&self) -> Result<String> {
        let output = self.git(&["describe", "--tags", "--abbrev=0"])?;
        let tag = output.stdout.trim().to_string();
        if tag.is_empty() {
            return Err(VersionManagerError::command(
                "git describe --tags --abbrev=0",
                "no tag found",
            ));
        }
        Ok(tag)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let lines = self.git_lines(&["branch", "--sort=-worktreepath"])?;

        // `*` marks the current branch, `+` a branch checked out in another worktree
        Ok(lines
            .iter()
            .map(|line| {
                line.strip_prefix('*')
                    .or_else(|| line.strip_prefix('+'))
                    .unwrap_or(line)
                    .trim()
                    .to_string()
            })
            .filter(|branch| !branch.is_empty())
            .collect())
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        self.git_lines(&["remote"])
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let output = self.git(&["remote", "get-url", remote])?;
        Ok(output.stdout.trim().to_string())
    }
}
