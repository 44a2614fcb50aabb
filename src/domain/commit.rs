use crate::error::{FlexVersionError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Length of the abbreviated hash exposed to templates
pub const SHORT_HASH_LEN: usize = 7;

/// A single commit as read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub date: DateTime<Utc>,
    /// Full commit message
    pub message: String,
    /// Tag names pointing at this commit
    pub refs: Vec<String>,
}

impl Commit {
    /// Create a commit without any refs attached
    pub fn new(
        hash: impl Into<String>,
        author: impl Into<String>,
        date: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Commit {
            hash: hash.into(),
            author: author.into(),
            date,
            message: message.into(),
            refs: Vec::new(),
        }
    }

    /// Attach tag names to this commit
    pub fn with_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.refs = refs.into_iter().map(Into::into).collect();
        self
    }

    /// Abbreviated hash (first 7 characters)
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }
}

/// Abbreviate a hash to at most [`SHORT_HASH_LEN`] characters
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Ordered commit history, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    commits: Vec<Commit>,
}

impl CommitLog {
    /// Build a log from head-first commits, rejecting duplicate hashes
    pub fn new(commits: Vec<Commit>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(commits.len());
        for commit in &commits {
            if !seen.insert(commit.hash.as_str()) {
                return Err(FlexVersionError::history(format!(
                    "duplicate commit hash '{}'",
                    commit.hash
                )));
            }
        }

        Ok(CommitLog { commits })
    }

    /// The most recent commit, if any
    pub fn head(&self) -> Option<&Commit> {
        self.commits.first()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Commit> {
        self.commits.iter()
    }

    pub fn as_slice(&self) -> &[Commit] {
        &self.commits
    }
}

impl<'a> IntoIterator for &'a CommitLog {
    type Item = &'a Commit;
    type IntoIter = std::slice::Iter<'a, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.iter()
    }
}
