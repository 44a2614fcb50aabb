use crate::domain::{Commit, CommitLog, Version};
use crate::error::{FlexVersionError, Result};
use regex::Regex;
use tracing::{debug, warn};

/// Name of the capture group that carries a baseline version
pub const VERSION_GROUP: &str = "version";

/// Condition identifying the version source commit
#[derive(Debug, Clone)]
pub enum AnchorRule {
    /// First commit carrying a tag that matches
    Tag(Regex),
    /// First commit whose message matches
    Message(Regex),
    /// First commit whose hash starts with this (lowercase) prefix
    Commit(String),
}

impl AnchorRule {
    /// Check one commit against the rule.
    ///
    /// Returns `None` when the commit is not an anchor, otherwise the
    /// baseline version text the commit carries, if any.
    fn detect(&self, commit: &Commit) -> Option<Option<String>> {
        match self {
            AnchorRule::Tag(regex) => commit.refs.iter().find_map(|tag| {
                let captures = regex.captures(tag)?;
                let baseline = match captures.name(VERSION_GROUP) {
                    Some(m) => Some(m.as_str().to_string()),
                    None => Version::parse(tag).ok().map(|_| tag.clone()),
                };
                Some(baseline)
            }),
            AnchorRule::Message(regex) => regex.captures(&commit.message).map(|captures| {
                match captures.name(VERSION_GROUP) {
                    Some(m) => Some(m.as_str().to_string()),
                    None => captures
                        .get(0)
                        .map(|m| m.as_str())
                        .filter(|text| Version::parse_exact(text).is_ok())
                        .map(str::to_string),
                }
            }),
            AnchorRule::Commit(prefix) => commit
                .hash
                .to_lowercase()
                .starts_with(prefix.as_str())
                .then_some(None),
        }
    }
}

/// How the anchor was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOrigin {
    /// The anchor rule matched this commit
    Found,
    /// Nothing matched; the oldest available commit stands in
    Assumed,
}

/// The version source commit and the history it delimits
#[derive(Debug, Clone)]
pub struct Anchor<'a> {
    /// Position of the anchor in the head-first log
    pub index: usize,
    pub commit: &'a Commit,
    pub origin: AnchorOrigin,
    /// Baseline version text recorded on the anchor, if any
    pub baseline: Option<String>,
    log: &'a [Commit],
}

impl<'a> Anchor<'a> {
    pub fn is_assumed(&self) -> bool {
        self.origin == AnchorOrigin::Assumed
    }

    /// Commits from head (inclusive) to anchor (exclusive)
    pub fn commits_since(&self) -> &'a [Commit] {
        &self.log[..self.index]
    }

    /// Commits from head down to and including the anchor
    pub fn log_to_version_source(&self) -> &'a [Commit] {
        &self.log[..=self.index]
    }
}

/// Walk the log from head backwards and locate the anchor commit.
///
/// Falls back to the oldest commit when the rule never matches. An empty
/// log is an `EmptyHistory` error.
pub fn resolve_anchor<'a>(rule: &AnchorRule, log: &'a CommitLog) -> Result<Anchor<'a>> {
    let commits = log.as_slice();
    if commits.is_empty() {
        return Err(FlexVersionError::EmptyHistory);
    }

    for (index, commit) in commits.iter().enumerate() {
        if let Some(baseline) = rule.detect(commit) {
            debug!(
                index,
                hash = commit.short_hash(),
                baseline = baseline.as_deref().unwrap_or("-"),
                "anchor found"
            );
            return Ok(Anchor {
                index,
                commit,
                origin: AnchorOrigin::Found,
                baseline,
                log: commits,
            });
        }
    }

    let index = commits.len() - 1;
    let commit = &commits[index];
    warn!(
        hash = commit.short_hash(),
        "no commit matched the anchor rule, assuming the oldest commit"
    );

    Ok(Anchor {
        index,
        commit,
        origin: AnchorOrigin::Assumed,
        baseline: None,
        log: commits,
    })
}
