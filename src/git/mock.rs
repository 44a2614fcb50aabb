use crate::domain::{Commit, CommitLog};
use crate::error::Result;
use crate::git::CommitSource;

/// Mock repository serving a fixed history, most recent commit first
pub struct MockRepository {
    path: String,
    branch: String,
    commits: Vec<Commit>,
}

impl MockRepository {
    /// Create a new empty mock repository on the given branch
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            path: "/mock/repo".to_string(),
            branch: branch.into(),
            commits: Vec::new(),
        }
    }

    /// Append a commit below the ones already added
    pub fn push_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Switch the checked-out branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("main")
    }
}

impl CommitSource for MockRepository {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn branch_name(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn commit_log(&self, max_commits: Option<usize>) -> Result<CommitLog> {
        let limit = max_commits.unwrap_or(self.commits.len());
        CommitLog::new(self.commits.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(hash: &str) -> Commit {
        Commit::new(
            hash,
            "Test Author",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            "test commit",
        )
    }

    #[test]
    fn test_mock_repository_basic() {
        let mut repo = MockRepository::new("feature/foo");
        repo.push_commit(commit("bbb"));
        repo.push_commit(commit("aaa"));

        assert_eq!(repo.branch_name().unwrap(), "feature/foo");
        let log = repo.commit_log(None).unwrap();
        assert_eq!(log.head().unwrap().hash, "bbb");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_mock_repository_limit() {
        let mut repo = MockRepository::default();
        for hash in ["c", "b", "a"] {
            repo.push_commit(commit(hash));
        }
        assert_eq!(repo.commit_log(Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_mock_repository_duplicate_hashes() {
        let mut repo = MockRepository::default();
        repo.push_commit(commit("a"));
        repo.push_commit(commit("a"));
        assert!(repo.commit_log(None).is_err());
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert_eq!(repo.branch_name().unwrap(), "main");
        assert!(repo.commit_log(None).unwrap().is_empty());
    }
}
