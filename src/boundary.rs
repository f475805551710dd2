use std::fmt;

/// Non-fatal conditions met while running the workflow.
/// These are reported to the user but never stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no reachable tag yet; a seed version is used
    NoPreviousTag,
    /// Latest tag cannot be read as a version; derivation restarts at v1.0.0
    MalformedTag { tag: String },
    /// Source branch is protected and will be kept after the merge
    ProtectedSourceBranch { branch: String },
    /// Release options were supplied but no tag is being created
    ReleaseWithoutTag,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPreviousTag => {
                write!(f, "No previous tag found, starting from the initial version")
            }
            BoundaryWarning::MalformedTag { tag } => {
                write!(
                    f,
                    "Cannot parse tag '{}' as a version, restarting at v1.0.0",
                    tag
                )
            }
            BoundaryWarning::ProtectedSourceBranch { branch } => {
                write!(f, "Branch '{}' is protected and will not be removed", branch)
            }
            BoundaryWarning::ReleaseWithoutTag => {
                write!(f, "A release was requested but no tag will be created; skipping release")
            }
        }
    }
}
