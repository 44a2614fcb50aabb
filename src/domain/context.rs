use crate::domain::commit::Commit;
use crate::error::{FlexVersionError, Result};
use chrono::{DateTime, Utc};

/// Versioning-relevant view of a repository: where it is, which branch is
/// checked out, and the commits from head down to the anchor (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext<'a> {
    pub path: String,
    pub branch_name: String,
    log_to_version_source: &'a [Commit],
}

impl<'a> RepositoryContext<'a> {
    pub fn new(
        path: impl Into<String>,
        branch_name: impl Into<String>,
        log_to_version_source: &'a [Commit],
    ) -> Self {
        RepositoryContext {
            path: path.into(),
            branch_name: branch_name.into(),
            log_to_version_source,
        }
    }

    /// The most recent commit
    pub fn head(&self) -> Result<&'a Commit> {
        self.log_to_version_source
            .first()
            .ok_or(FlexVersionError::EmptyHistory)
    }

    /// All commits up to and including the anchor commit
    pub fn log_to_version_source(&self) -> &'a [Commit] {
        self.log_to_version_source
    }

    pub fn last_author(&self) -> Result<&'a str> {
        Ok(self.head()?.author.as_str())
    }

    pub fn last_commit_date(&self) -> Result<DateTime<Utc>> {
        Ok(self.head()?.date)
    }

    /// Final `/`-separated segment of the branch name
    pub fn short_branch_name(&self) -> &str {
        short_branch_name(&self.branch_name)
    }
}

/// Final `/`-separated segment of a branch name ("feature/foo" -> "foo")
pub fn short_branch_name(branch_name: &str) -> &str {
    branch_name.rsplit('/').next().unwrap_or(branch_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_branch_name() {
        assert_eq!(short_branch_name("feature/foo"), "foo");
        assert_eq!(short_branch_name("users/jd/fix/login"), "login");
        assert_eq!(short_branch_name("main"), "main");
        assert_eq!(short_branch_name("trailing/"), "");
    }

    #[test]
    fn test_head_fields() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
        let commits = vec![
            Commit::new("bbb", "Alice", date, "feat: b"),
            Commit::new("aaa", "Bob", date, "feat: a"),
        ];
        let ctx = RepositoryContext::new("/repo", "feature/foo", &commits);

        assert_eq!(ctx.head().unwrap().hash, "bbb");
        assert_eq!(ctx.last_author().unwrap(), "Alice");
        assert_eq!(ctx.last_commit_date().unwrap(), date);
        assert_eq!(ctx.short_branch_name(), "foo");
    }

    #[test]
    fn test_empty_context_head_fails() {
        let ctx = RepositoryContext::new("/repo", "main", &[]);
        assert!(matches!(ctx.head(), Err(FlexVersionError::EmptyHistory)));
    }
}
