use crate::domain::prerelease::PreRelease;
use std::fmt;

/// Semantic version as it appears in a tag, e.g. `v1.2.3` or `1.2.3-pre.4`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<PreRelease>,
    /// Whether the tag carried a leading `v`
    pub v_prefix: bool,
}

impl SemVer {
    /// Create a stable version displayed with a leading `v`
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
            prerelease: None,
            v_prefix: true,
        }
    }

    /// Same version with a pre-release suffix
    pub fn with_prerelease(mut self, prerelease: PreRelease) -> Self {
        self.prerelease = Some(prerelease);
        self
    }

    /// Parse a tag permissively.
    ///
    /// Leading/trailing whitespace and a single leading `v` are stripped, a
    /// trailing `-pre.<n>` is split off, and the first three dot-separated
    /// components become major/minor/patch. Components that are not numbers
    /// count as zero; extra components are ignored.
    ///
    /// Returns `None` when the input is blank or has fewer than three
    /// components.
    pub fn parse(tag: &str) -> Option<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (body, v_prefix) = match trimmed.strip_prefix('v') {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        let (main, prerelease) = PreRelease::split(body);

        let parts: Vec<&str> = main.split('.').collect();
        if parts.len() < 3 {
            return None;
        }

        let component = |s: &str| s.parse::<u64>().unwrap_or(0);

        Some(SemVer {
            major: component(parts[0]),
            minor: component(parts[1]),
            patch: component(parts[2]),
            prerelease,
            v_prefix,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Stable major bump: `X+1.0.0`
    pub fn bump_major(&self) -> Self {
        SemVer {
            major: self.major.saturating_add(1),
            minor: 0,
            patch: 0,
            prerelease: None,
            v_prefix: self.v_prefix,
        }
    }

    /// Stable minor bump: `x.Y+1.0`
    pub fn bump_minor(&self) -> Self {
        SemVer {
            minor: self.minor.saturating_add(1),
            patch: 0,
            prerelease: None,
            ..*self
        }
    }

    /// Stable patch bump: `x.y.Z+1`
    pub fn bump_patch(&self) -> Self {
        SemVer {
            patch: self.patch.saturating_add(1),
            prerelease: None,
            ..*self
        }
    }

    /// The plain `major.minor.patch` core, keeping the prefix flag
    pub fn core(&self) -> Self {
        SemVer {
            prerelease: None,
            ..*self
        }
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.v_prefix {
            write!(f, "v")?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
