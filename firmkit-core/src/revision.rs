//! Pinned source-control revisions

/// An exact, immutable revision a dependency repository is checked out to
///
/// Revisions are raw commit hashes, not tags or branch names, so a
/// successful checkout always yields the same tree. The value is fixed
/// for the whole pipeline run; checkout fails if the repository cannot
/// resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedRevision {
    /// Human-readable name of the repository being pinned
    pub repository: String,
    /// Commit hash the repository must be checked out to
    pub commit: String,
}

impl PinnedRevision {
    pub fn new(repository: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            commit: commit.into(),
        }
    }
}

impl std::fmt::Display for PinnedRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.repository, self.commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_repo_and_commit() {
        let pin = PinnedRevision::new("esp-idf", "6568f8c");
        assert_eq!(pin.to_string(), "esp-idf@6568f8c");
    }
}
