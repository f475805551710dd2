use crate::error::{Result, VersionManagerError};
use std::fmt;
use std::str::FromStr;

/// Requested version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

impl BumpKind {
    pub const STABLE: [BumpKind; 3] = [BumpKind::Major, BumpKind::Minor, BumpKind::Patch];

    pub const PRE: [BumpKind; 4] = [
        BumpKind::PreMajor,
        BumpKind::PreMinor,
        BumpKind::PrePatch,
        BumpKind::PreRelease,
    ];

    /// Whether this bump produces a `-pre.<n>` tag
    pub fn is_pre(&self) -> bool {
        matches!(
            self,
            BumpKind::PreMajor | BumpKind::PreMinor | BumpKind::PrePatch | BumpKind::PreRelease
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::PreMajor => "premajor",
            BumpKind::PreMinor => "preminor",
            BumpKind::PrePatch => "prepatch",
            BumpKind::PreRelease => "prerelease",
        }
    }

    /// Short explanation shown next to the kind in prompts.
    pub fn description(&self) -> &'static str {
        match self {
            BumpKind::Major => "breaking changes, compatibility impact. vX.x.x",
            BumpKind::Minor => "new features and improvements. vx.X.x",
            BumpKind::Patch => "bug fixes and small changes. vx.x.X",
            BumpKind::PreMajor => "pre-release ahead of a major release. vX.x.x-pre.n",
            BumpKind::PreMinor => "pre-release ahead of a minor release. vx.X.x-pre.n",
            BumpKind::PrePatch => "pre-release ahead of a patch release. vx.x.X-pre.n",
            BumpKind::PreRelease => "next pre-release of the current version. vx.x.x-pre.N",
        }
    }

    /// Parse a user-supplied kind where `""` and `"none"` mean "do not tag".
    pub fn parse_optional(s: &str) -> Result<Option<BumpKind>> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for BumpKind {
    type Err = VersionManagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "premajor" => Ok(BumpKind::PreMajor),
            "preminor" => Ok(BumpKind::PreMinor),
            "prepatch" => Ok(BumpKind::PrePatch),
            "prerelease" => Ok(BumpKind::PreRelease),
            _ => Err(VersionManagerError::config(format!(
                "Unknown bump kind '{}': expected one of major, minor, patch, premajor, preminor, prepatch, prerelease or none",
                s
            ))),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
