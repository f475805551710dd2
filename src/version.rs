//! Next-tag derivation.
//!
//! Pure functions: given the latest tag (if any) and a requested bump kind,
//! produce the next tag string. Malformed input never fails; it resets to
//! `v1.0.0`.

use crate::boundary::BoundaryWarning;
use crate::domain::{BumpKind, PreRelease, SemVer};

/// Derives the next tag from the latest tag and a bump kind string.
///
/// Unknown or empty bump kinds leave the version unchanged (or seed
/// `v1.0.0` when there is no previous tag).
///
/// # Example
/// ```
/// use version_manager::version::derive_next_tag;
///
/// assert_eq!(derive_next_tag(Some("v1.0.0"), "minor"), "v1.1.0");
/// assert_eq!(derive_next_tag(Some("v1.0.0-pre.0"), "prerelease"), "v1.0.0-pre.1");
/// assert_eq!(derive_next_tag(None, "premajor"), "v1.0.0-pre.0");
/// ```
pub fn derive_next_tag(latest_tag: Option<&str>, bump_kind: &str) -> String {
    next_tag(latest_tag, bump_kind.parse::<BumpKind>().ok())
}

/// Typed form of [`derive_next_tag`].
pub fn next_tag(latest_tag: Option<&str>, bump: Option<BumpKind>) -> String {
    let Some(latest) = latest_tag.map(str::trim).filter(|t| !t.is_empty()) else {
        return seed_version(bump).to_string();
    };

    match SemVer::parse(latest) {
        Some(current) => bump_version(&current, bump).to_string(),
        None => SemVer::new(1, 0, 0).to_string(),
    }
}

/// First version for a repository without tags.
pub fn seed_version(bump: Option<BumpKind>) -> SemVer {
    match bump {
        Some(BumpKind::PreMajor) => SemVer::new(1, 0, 0).with_prerelease(PreRelease::start()),
        Some(BumpKind::PreMinor) => SemVer::new(0, 1, 0).with_prerelease(PreRelease::start()),
        Some(BumpKind::PrePatch | BumpKind::PreRelease) => {
            SemVer::new(0, 0, 1).with_prerelease(PreRelease::start())
        }
        _ => SemVer::new(1, 0, 0),
    }
}

/// Applies a bump to a parsed version.
///
/// - `major`/`minor`/`patch` bump the core and drop any pre-release.
/// - `premajor`/`preminor`/`prepatch` on a pre-release only increment the
///   counter; on a stable version they bump the core and start at `pre.0`.
/// - `prerelease` never touches the core: it increments the counter or
///   starts at `pre.0`.
/// - No bump returns the core unchanged.
pub fn bump_version(current: &SemVer, bump: Option<BumpKind>) -> SemVer {
    match bump {
        Some(BumpKind::Major) => current.bump_major(),
        Some(BumpKind::Minor) => current.bump_minor(),
        Some(BumpKind::Patch) => current.bump_patch(),
        Some(BumpKind::PreMajor) => pre_bump(current, SemVer::bump_major),
        Some(BumpKind::PreMinor) => pre_bump(current, SemVer::bump_minor),
        Some(BumpKind::PrePatch) => pre_bump(current, SemVer::bump_patch),
        Some(BumpKind::PreRelease) => pre_bump(current, SemVer::core),
        None => current.core(),
    }
}

fn pre_bump(current: &SemVer, stable_bump: fn(&SemVer) -> SemVer) -> SemVer {
    match current.prerelease {
        Some(pre) => current.with_prerelease(pre.increment()),
        None => stable_bump(current).with_prerelease(PreRelease::start()),
    }
}

/// Reports a latest tag that derivation will treat as malformed.
pub fn inspect_tag(latest_tag: Option<&str>) -> Option<BoundaryWarning> {
    let tag = latest_tag.map(str::trim).filter(|t| !t.is_empty());
    match tag {
        None => Some(BoundaryWarning::NoPreviousTag),
        Some(tag) if SemVer::parse(tag).is_none() => Some(BoundaryWarning::MalformedTag {
            tag: tag.to_string(),
        }),
        Some(_) => None,
    }
}
