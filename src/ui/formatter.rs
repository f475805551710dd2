//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no side effects beyond printing.

use crate::boundary::BoundaryWarning;
use crate::workflow::{Step, StepError, WorkflowOutcome};
use console::style;

/// Print a bold green title line.
pub fn display_title(message: &str) {
    println!("{}", style(message).green().bold());
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print the line of a step that failed; the error itself is reported once by
/// [display_step_error].
pub fn display_failure(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo a choice collected from the user or the command line.
pub fn display_choice(label: &str, value: impl std::fmt::Display) {
    println!("{} {}: {}", style("ℹ").blue(), label, style(value).bold());
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Report the step that stopped the workflow.
///
/// Release failures are reported separately from git failures: by the time
/// the release step runs, every git change has already been made.
pub fn display_step_error(err: &StepError) {
    display_error(&step_error_message(err));
    if err.is_release_failure() {
        display_status("Git changes were applied; the tag exists, only the hosted release is missing.");
    } else if err.step != Step::Start {
        display_status("Steps completed before the failure were not rolled back.");
    }
}

/// The single failure line for a run, naming the step that failed.
pub fn step_error_message(err: &StepError) -> String {
    match err.step {
        Step::Start => format!("Invalid configuration, nothing was run: {}", err.source),
        Step::CreateRelease => format!(
            "Release publishing failed ({}): {}",
            err.step.label(),
            err.source
        ),
        step => format!("Git step '{}' failed: {}", step.label(), err.source),
    }
}

/// Summarise a finished run.
pub fn display_outcome(outcome: &WorkflowOutcome) {
    match &outcome.tag {
        Some(tag) => display_success(&format!("Version management finished, created tag {}", tag)),
        None => display_success("Version management finished"),
    }
}

/// List local branches and remotes.
pub fn display_repository_overview(branches: &[String], remotes: &[String]) {
    println!("{}", style("Local branches:").bold());
    for branch in branches {
        println!("  - {}", branch);
    }
    println!("{}", style("Remotes:").bold());
    for remote in remotes {
        println!("  - {}", remote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionManagerError;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_failure() {
        display_failure("Merging feature into main");
    }

    #[test]
    fn test_step_error_message_for_git_step() {
        let err = StepError {
            step: Step::MergeForward,
            source: VersionManagerError::command("git merge feature", "CONFLICT"),
        };
        let msg = step_error_message(&err);
        assert!(msg.starts_with("Git step 'merge forward' failed"));
        assert_eq!(msg.matches("CONFLICT").count(), 1);
    }

    #[test]
    fn test_step_error_message_for_invalid_config() {
        let err = StepError {
            step: Step::Start,
            source: VersionManagerError::config("Source and destination branch are both 'main'"),
        };
        let msg = step_error_message(&err);
        assert!(msg.starts_with("Invalid configuration"));
        assert!(!msg.contains("Git step"));
    }

    #[test]
    fn test_step_error_message_for_release() {
        let err = StepError {
            step: Step::CreateRelease,
            source: VersionManagerError::network(401, "Bad credentials"),
        };
        assert!(step_error_message(&err).starts_with("Release publishing failed (create release)"));
    }
}
