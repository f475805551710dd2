/// A tag created by the workflow, as handed to the release publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Extract version number from tag (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        self.name.strip_prefix('v').unwrap_or(&self.name)
    }

    /// Tag name used for hosted releases: the version with exactly one leading `v`
    pub fn release_name(&self) -> String {
        format!("v{}", self.version_part())
    }

    /// Any `-` suffix marks a pre-release for hosting platforms
    pub fn is_prerelease(&self) -> bool {
        self.name.contains('-')
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
