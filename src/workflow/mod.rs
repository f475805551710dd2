//! The merge → tag → release → cleanup workflow.
//!
//! [Workflow::run] walks the [Step] states in order over an immutable
//! [WorkflowConfig]. The first failing state stops the run; nothing that has
//! already been applied is rolled back.

mod step;

pub use step::{RunState, Step};

use crate::boundary::BoundaryWarning;
use crate::config::BehaviorConfig;
use crate::domain::{BumpKind, Tag};
use crate::error::{Result, VersionManagerError};
use crate::git::Repository;
use crate::progress::Progress;
use crate::release::{ReleasePublisher, ReleaseRequest, RepoType};
use crate::version;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Choices for one run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    pub remote: String,
    pub source_branch: String,
    pub destination_branch: String,
    pub push: bool,
    pub remove_branch: bool,
    /// `None` means no tag is created
    pub bump: Option<BumpKind>,
    pub create_release: bool,
    pub repo_type: Option<RepoType>,
    pub release_title: String,
    pub release_notes: String,
}

impl WorkflowConfig {
    /// Merge-only configuration: no push, no tag, no release, source branch kept
    pub fn new(
        remote: impl Into<String>,
        source_branch: impl Into<String>,
        destination_branch: impl Into<String>,
    ) -> Self {
        WorkflowConfig {
            remote: remote.into(),
            source_branch: source_branch.into(),
            destination_branch: destination_branch.into(),
            push: false,
            remove_branch: false,
            bump: None,
            create_release: false,
            repo_type: None,
            release_title: String::new(),
            release_notes: String::new(),
        }
    }

    /// Whether a release will be published
    pub fn wants_release(&self) -> bool {
        self.create_release && self.bump.is_some()
    }

    /// Check the configuration before any step runs.
    ///
    /// Returns the non-fatal warnings the run should report.
    pub fn validate(&self) -> Result<Vec<BoundaryWarning>> {
        if self.remote.trim().is_empty() {
            return Err(VersionManagerError::config("No remote selected"));
        }
        if self.source_branch.trim().is_empty() || self.destination_branch.trim().is_empty() {
            return Err(VersionManagerError::config(
                "Source and destination branches must be set",
            ));
        }
        if self.source_branch == self.destination_branch {
            return Err(VersionManagerError::config(format!(
                "Source and destination branch are both '{}'",
                self.source_branch
            )));
        }
        if self.wants_release() && self.repo_type.is_none() {
            return Err(VersionManagerError::config(
                "A release was requested without a repository type",
            ));
        }

        let mut warnings = Vec::new();
        if self.create_release && self.bump.is_none() {
            warnings.push(BoundaryWarning::ReleaseWithoutTag);
        }
        Ok(warnings)
    }
}

/// Minimum on-screen durations for successful steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimings {
    pub default: Duration,
    /// Used for the combined tag and branch push
    pub tag_push: Duration,
}

impl StepTimings {
    /// No artificial delay
    pub fn none() -> Self {
        StepTimings {
            default: Duration::ZERO,
            tag_push: Duration::ZERO,
        }
    }

    pub fn for_step(&self, step: Step) -> Duration {
        match step {
            Step::PushTagAndDestination => self.tag_push,
            _ => self.default,
        }
    }
}

impl Default for StepTimings {
    fn default() -> Self {
        StepTimings {
            default: Duration::from_secs(2),
            tag_push: Duration::from_secs(5),
        }
    }
}

impl From<&BehaviorConfig> for StepTimings {
    fn from(behavior: &BehaviorConfig) -> Self {
        StepTimings {
            default: behavior.min_step_duration(),
            tag_push: behavior.tag_push_min_duration(),
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowOutcome {
    /// Tag created in this run
    pub tag: Option<String>,
    /// States that did work, in order
    pub executed: Vec<Step>,
    /// States that were no-ops for this configuration
    pub skipped: Vec<Step>,
}

/// A fatal failure, attributed to the state that raised it
#[derive(Error, Debug)]
#[error("Step '{}' failed: {source}", .step.label())]
pub struct StepError {
    pub step: Step,
    pub source: VersionManagerError,
}

impl StepError {
    /// Failures of the hosted release call are reported apart from git failures
    pub fn is_release_failure(&self) -> bool {
        self.step == Step::CreateRelease
    }
}

/// Runs the workflow against a repository, a release publisher and a progress reporter
pub struct Workflow<'a, R, P, G> {
    repo: &'a R,
    publisher: &'a P,
    progress: &'a G,
    timings: StepTimings,
}

impl<'a, R, P, G> Workflow<'a, R, P, G>
where
    R: Repository,
    P: ReleasePublisher,
    G: Progress,
{
    pub fn new(repo: &'a R, publisher: &'a P, progress: &'a G) -> Self {
        Workflow {
            repo,
            publisher,
            progress,
            timings: StepTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: StepTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Run every state from start to done, stopping at the first failure
    pub fn run(&self, config: &WorkflowConfig) -> std::result::Result<WorkflowOutcome, StepError> {
        let warnings = config.validate().map_err(|source| StepError {
            step: Step::Start,
            source,
        })?;
        for warning in &warnings {
            self.progress.warn(warning);
        }

        let mut state = RunState::default();
        let mut outcome = WorkflowOutcome::default();
        let mut step = Step::Start.next(config);

        while step != Step::Done {
            if step.should_run(config, &state) {
                debug!(step = %step, "running step");
                self.execute(step, config, &mut state)
                    .map_err(|source| StepError { step, source })?;
                outcome.executed.push(step);
            } else {
                debug!(step = %step, "skipping step");
                outcome.skipped.push(step);
            }
            step = step.next(config);
        }

        outcome.tag = state.tag;
        info!(tag = ?outcome.tag, "workflow finished");
        Ok(outcome)
    }

    fn execute(&self, step: Step, config: &WorkflowConfig, state: &mut RunState) -> Result<()> {
        let message = step.describe(config);
        let min_duration = self.timings.for_step(step);

        match step {
            Step::CheckoutDestination => self.progress.run(&message, min_duration, || {
                self.repo.checkout(&config.destination_branch)
            }),
            Step::MergeForward => self.progress.run(&message, min_duration, || {
                self.repo.merge(&config.source_branch)
            }),
            Step::PushDestination => self.progress.run(&message, min_duration, || {
                self.repo.push(&config.remote, &config.destination_branch)
            }),
            Step::CreateTag => {
                let tag = self.create_tag(&message, min_duration, config)?;
                state.tag = Some(tag);
                Ok(())
            }
            Step::PushTagAndDestination => self.progress.run(&message, min_duration, || {
                let tag = self.repo.latest_tag()?;
                self.repo.push_tag(&config.remote, &tag)?;
                self.repo.push(&config.remote, &config.destination_branch)
            }),
            Step::CreateRelease => {
                let tag = state.tag.as_deref().unwrap_or_default();
                self.progress.run(&message, min_duration, || {
                    self.publish_release(tag, config)
                })
            }
            Step::DeleteSourceBranch => self.progress.run(&message, min_duration, || {
                self.repo.delete_branch(&config.source_branch)
            }),
            Step::RestoreSourceBranch => self.progress.run(&message, min_duration, || {
                self.repo.checkout(&config.source_branch)
            }),
            Step::MergeBack => self.progress.run(&message, min_duration, || {
                self.repo.merge(&config.destination_branch)
            }),
            Step::PushSource => self.progress.run(&message, min_duration, || {
                self.repo.push(&config.remote, &config.source_branch)
            }),
            Step::Start | Step::Done => Ok(()),
        }
    }

    fn create_tag(
        &self,
        message: &str,
        min_duration: Duration,
        config: &WorkflowConfig,
    ) -> Result<String> {
        // No tag yet is a normal starting point, not a failure
        let latest = self.repo.latest_tag().ok();
        if let Some(warning) = version::inspect_tag(latest.as_deref()) {
            self.progress.warn(&warning);
        }

        let tag = version::next_tag(latest.as_deref(), config.bump);
        debug!(latest = ?latest, next = %tag, "derived next tag");

        self.progress.run(message, min_duration, || {
            self.repo.create_tag(&tag, &format!("Version {}", tag))
        })?;
        Ok(tag)
    }

    fn publish_release(&self, tag: &str, config: &WorkflowConfig) -> Result<()> {
        let repo_type = config.repo_type.ok_or_else(|| {
            VersionManagerError::config("A release was requested without a repository type")
        })?;
        let remote_url = self.repo.remote_url(&config.remote)?;

        self.publisher.publish(&ReleaseRequest {
            tag: Tag::new(tag),
            title: config.release_title.clone(),
            notes: config.release_notes.clone(),
            target_branch: config.destination_branch.clone(),
            repo_type,
            remote_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_same_branch() {
        let config = WorkflowConfig::new("origin", "main", "main");
        assert!(matches!(
            config.validate(),
            Err(VersionManagerError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_remote() {
        let config = WorkflowConfig::new(" ", "feature", "main");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_repo_type_for_release() {
        let mut config = WorkflowConfig::new("origin", "feature", "main");
        config.bump = Some(BumpKind::Minor);
        config.create_release = true;
        assert!(config.validate().is_err());

        config.repo_type = Some(RepoType::GitLab);
        assert_eq!(config.validate().unwrap(), vec![]);
    }

    #[test]
    fn test_release_without_tag_is_a_warning() {
        let mut config = WorkflowConfig::new("origin", "feature", "main");
        config.create_release = true;
        assert_eq!(
            config.validate().unwrap(),
            vec![BoundaryWarning::ReleaseWithoutTag]
        );
    }

    #[test]
    fn test_step_timings() {
        let timings = StepTimings::default();
        assert_eq!(timings.for_step(Step::MergeForward), Duration::from_secs(2));
        assert_eq!(
            timings.for_step(Step::PushTagAndDestination),
            Duration::from_secs(5)
        );
        assert_eq!(StepTimings::from(&BehaviorConfig::default()), timings);
    }

    #[test]
    fn test_step_error_names_step() {
        let err = StepError {
            step: Step::MergeForward,
            source: VersionManagerError::command("git merge feature", "CONFLICT"),
        };
        assert!(err.to_string().starts_with("Step 'merge forward' failed"));
        assert!(!err.is_release_failure());
    }
}
