use super::WorkflowConfig;
use std::fmt;

/// States of the merge, tag, release and cleanup workflow.
///
/// ```text
/// Start → CheckoutDestination → MergeForward → PushDestination
///       → CreateTag → PushTagAndDestination → CreateRelease
///       → (RestoreSourceBranch → MergeBack → PushSource) | DeleteSourceBranch
///       → Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Start,
    CheckoutDestination,
    MergeForward,
    PushDestination,
    CreateTag,
    PushTagAndDestination,
    CreateRelease,
    DeleteSourceBranch,
    RestoreSourceBranch,
    MergeBack,
    PushSource,
    Done,
}

/// What the run has produced so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Tag created in this run
    pub tag: Option<String>,
}

impl Step {
    /// The state after this one. Only the branch epilogue depends on the config.
    pub fn next(self, config: &WorkflowConfig) -> Step {
        match self {
            Step::Start => Step::CheckoutDestination,
            Step::CheckoutDestination => Step::MergeForward,
            Step::MergeForward => Step::PushDestination,
            Step::PushDestination => Step::CreateTag,
            Step::CreateTag => Step::PushTagAndDestination,
            Step::PushTagAndDestination => Step::CreateRelease,
            Step::CreateRelease if config.remove_branch => Step::DeleteSourceBranch,
            Step::CreateRelease => Step::RestoreSourceBranch,
            Step::DeleteSourceBranch => Step::Done,
            Step::RestoreSourceBranch => Step::MergeBack,
            Step::MergeBack => Step::PushSource,
            Step::PushSource => Step::Done,
            Step::Done => Step::Done,
        }
    }

    /// Whether this state does any work for `config` given what has run so far.
    /// A state that returns false is a no-op success.
    pub fn should_run(self, config: &WorkflowConfig, state: &RunState) -> bool {
        match self {
            Step::Start | Step::Done => false,
            Step::PushDestination | Step::PushSource => config.push,
            Step::CreateTag => config.bump.is_some(),
            Step::PushTagAndDestination => config.push && state.tag.is_some(),
            Step::CreateRelease => config.create_release && state.tag.is_some(),
            Step::CheckoutDestination
            | Step::MergeForward
            | Step::DeleteSourceBranch
            | Step::RestoreSourceBranch
            | Step::MergeBack => true,
        }
    }

    /// Short name used when reporting failures
    pub fn label(self) -> &'static str {
        match self {
            Step::Start => "start",
            Step::CheckoutDestination => "checkout destination",
            Step::MergeForward => "merge forward",
            Step::PushDestination => "push destination",
            Step::CreateTag => "create tag",
            Step::PushTagAndDestination => "push tag and destination",
            Step::CreateRelease => "create release",
            Step::DeleteSourceBranch => "delete source branch",
            Step::RestoreSourceBranch => "restore source branch",
            Step::MergeBack => "merge back",
            Step::PushSource => "push source",
            Step::Done => "done",
        }
    }

    /// Progress message shown while the state runs
    pub fn describe(self, config: &WorkflowConfig) -> String {
        match self {
            Step::Start => "Starting".to_string(),
            Step::CheckoutDestination => format!(
                "Checking out to destination branch: {}",
                config.destination_branch
            ),
            Step::MergeForward => format!(
                "Merging {} into {}",
                config.source_branch, config.destination_branch
            ),
            Step::PushDestination => format!(
                "Pushing {} to {}",
                config.destination_branch, config.remote
            ),
            Step::CreateTag => "Creating version tag".to_string(),
            Step::PushTagAndDestination => "Updating tag in remote repository".to_string(),
            Step::CreateRelease => match config.repo_type {
                Some(repo_type) => format!("Creating {} release", repo_type.display_name()),
                None => "Creating release".to_string(),
            },
            Step::DeleteSourceBranch => {
                format!("Removing source branch: {}", config.source_branch)
            }
            Step::RestoreSourceBranch => {
                format!("Checking out to source branch: {}", config.source_branch)
            }
            Step::MergeBack => format!(
                "Merging {} into {}",
                config.destination_branch, config.source_branch
            ),
            Step::PushSource => format!("Pushing {} to {}", config.source_branch, config.remote),
            Step::Done => "Done".to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BumpKind;

    fn config() -> WorkflowConfig {
        WorkflowConfig::new("origin", "feature", "main")
    }

    fn walk(config: &WorkflowConfig) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut step = Step::Start;
        while step != Step::Done {
            step = step.next(config);
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_restore_path_without_removal() {
        let steps = walk(&config());
        assert!(steps.contains(&Step::RestoreSourceBranch));
        assert!(steps.contains(&Step::MergeBack));
        assert!(steps.contains(&Step::PushSource));
        assert!(!steps.contains(&Step::DeleteSourceBranch));
    }

    #[test]
    fn test_delete_path_with_removal() {
        let mut config = config();
        config.remove_branch = true;

        let steps = walk(&config);
        assert_eq!(steps[steps.len() - 2], Step::DeleteSourceBranch);
        assert!(!steps.contains(&Step::RestoreSourceBranch));
    }

    #[test]
    fn test_tag_steps_need_a_tag() {
        let mut config = config();
        config.push = true;
        config.create_release = true;
        let empty = RunState::default();

        assert!(!Step::CreateTag.should_run(&config, &empty));
        assert!(!Step::PushTagAndDestination.should_run(&config, &empty));
        assert!(!Step::CreateRelease.should_run(&config, &empty));

        config.bump = Some(BumpKind::Patch);
        let tagged = RunState {
            tag: Some("v1.0.1".to_string()),
        };
        assert!(Step::CreateTag.should_run(&config, &empty));
        assert!(Step::PushTagAndDestination.should_run(&config, &tagged));
        assert!(Step::CreateRelease.should_run(&config, &tagged));
    }

    #[test]
    fn test_push_steps_follow_push_flag() {
        let config = config();
        let state = RunState {
            tag: Some("v1.0.0".to_string()),
        };
        assert!(!Step::PushDestination.should_run(&config, &state));
        assert!(!Step::PushTagAndDestination.should_run(&config, &state));
        assert!(!Step::PushSource.should_run(&config, &state));
    }

    #[test]
    fn test_describe_names_branches() {
        let config = config();
        assert_eq!(
            Step::MergeForward.describe(&config),
            "Merging feature into main"
        );
        assert_eq!(Step::MergeBack.describe(&config), "Merging main into feature");
        assert_eq!(
            Step::CheckoutDestination.describe(&config),
            "Checking out to destination branch: main"
        );
    }
}
