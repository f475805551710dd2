/// A branch name together with the policies that apply to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_protected: bool,
    pub is_prerelease: bool,
}

impl BranchContext {
    /// Classify a branch against the configured protected and pre-release branch lists
    pub fn new(
        name: impl Into<String>,
        protected_branches: &[String],
        prerelease_branches: &[String],
    ) -> Self {
        let name = name.into();
        let is_protected = protected_branches.iter().any(|b| *b == name);
        let is_prerelease = prerelease_branches.iter().any(|b| *b == name);

        BranchContext {
            name,
            is_protected,
            is_prerelease,
        }
    }

    /// Protected branches are never offered for deletion after the merge
    pub fn may_be_removed(&self) -> bool {
        !self.is_protected
    }
}
