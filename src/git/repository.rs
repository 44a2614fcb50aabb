use crate::domain::{Commit, CommitLog};
use crate::error::Result;
use crate::git::CommitSource;
use chrono::{DateTime, Utc};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name reported for a detached HEAD
pub const DETACHED_HEAD: &str = "HEAD";

/// Wrapper around git2::Repository implementing [`CommitSource`]
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Tag names grouped by the commit they peel to
    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.entry(commit.id()).or_default().push(name.to_string()),
                Err(e) => debug!(tag = name, error = %e, "skipping tag without a commit target"),
            }
        }

        for names in tags.values_mut() {
            names.sort();
        }

        Ok(tags)
    }
}

impl CommitSource for Git2Repository {
    fn path(&self) -> String {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .display()
            .to_string()
    }

    fn branch_name(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Ok(DETACHED_HEAD.to_string());
        }

        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().unwrap_or(DETACHED_HEAD).to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or(DETACHED_HEAD);
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn commit_log(&self, max_commits: Option<usize>) -> Result<CommitLog> {
        let tags = self.tags_by_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("repository has no commits yet");
                return Ok(CommitLog::default());
            }
            Err(e) => return Err(e.into()),
        }

        let mut commits = Vec::new();
        for oid_result in revwalk.take(max_commits.unwrap_or(usize::MAX)) {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let message = commit.message().unwrap_or("(empty message)").to_string();
            let author = commit.author().name().unwrap_or("unknown").to_string();
            let date =
                DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();

            commits.push(
                Commit::new(oid.to_string(), author, date, message)
                    .with_refs(tags.get(&oid).cloned().unwrap_or_default()),
            );
        }

        debug!(commits = commits.len(), tags = tags.len(), "commit log read");
        CommitLog::new(commits)
    }
}
