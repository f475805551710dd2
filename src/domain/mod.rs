//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod bump;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use bump::BumpKind;
pub use prerelease::{PreRelease, PRERELEASE_LABEL};
pub use tag::Tag;
pub use version::SemVer;
