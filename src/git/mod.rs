//! Repository access layer
//!
//! The engine never touches a repository itself. It is handed a
//! [`CommitLog`] and a branch name produced by a [`CommitSource`]:
//!
//! - [repository::Git2Repository]: reads a real repository through `git2`
//! - [mock::MockRepository]: serves a fixed history for tests
//!
//! ```rust
//! # use git_flexver::git::CommitSource;
//! # fn example<S: CommitSource>(source: &S) -> git_flexver::Result<()> {
//! let branch = source.branch_name()?;
//! let log = source.commit_log(Some(500))?;
//! println!("{} commits on {}", log.len(), branch);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitLog;
use crate::error::Result;

/// Supplies the inputs of a resolution run
pub trait CommitSource {
    /// Path of the repository being versioned
    fn path(&self) -> String;

    /// Name of the checked-out branch (`HEAD` when detached)
    fn branch_name(&self) -> Result<String>;

    /// History reachable from HEAD, most recent first, with tag names
    /// attached to the commits they point at.
    ///
    /// # Arguments
    /// * `max_commits` - Stop walking after this many commits
    fn commit_log(&self, max_commits: Option<usize>) -> Result<CommitLog>;
}
