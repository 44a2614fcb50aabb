use crate::diagnostics::Diagnostic;
use crate::domain::conventional::classify;
use crate::domain::{BumpStrategy, RepositoryContext, Version, VersionBump};
use crate::engine::anchor::Anchor;
use crate::engine::matcher::MatchedStrategy;
use crate::engine::renderer::Placeholders;
use crate::error::Result;
use tracing::debug;

/// Label template used by `prerelease` when the rule does not set one
pub const DEFAULT_PRERELEASE_LABEL: &str = "{short_branch}.{count}";

/// The computed version for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: Version,
    pub pre_release: Option<String>,
    /// Commits from head (inclusive) to anchor (exclusive)
    pub commits_since_anchor: usize,
    pub anchor_hash: String,
    pub head_hash: String,
    pub anchor_assumed: bool,
    pub strategy: BumpStrategy,
}

impl ResolvedVersion {
    /// `major.minor.patch`, with `-label` when a pre-release label is set
    pub fn semver(&self) -> String {
        match &self.pre_release {
            Some(label) if !label.is_empty() => format!("{}-{}", self.version, label),
            _ => self.version.to_string(),
        }
    }
}

/// Compute the resolved version from the anchor and the matched strategy.
///
/// The baseline comes from the anchor when it records one, otherwise from
/// `default_baseline`. A baseline that does not parse aborts the run.
pub fn calculate(
    ctx: &RepositoryContext<'_>,
    anchor: &Anchor<'_>,
    matched: &MatchedStrategy<'_>,
    default_baseline: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ResolvedVersion> {
    let head = ctx.head()?;
    let baseline_text = anchor.baseline.as_deref().unwrap_or(default_baseline);
    let baseline = Version::parse(baseline_text)?;
    let commits_since = anchor.commits_since();
    let count = commits_since.len();

    let mut pre_release = None;
    let version = match matched.strategy {
        BumpStrategy::Major => baseline.bump(VersionBump::Major)?,
        BumpStrategy::Minor => baseline.bump(VersionBump::Minor)?,
        BumpStrategy::Patch => baseline.bump(VersionBump::Patch)?,
        BumpStrategy::Prerelease => {
            let template = matched.label.unwrap_or(DEFAULT_PRERELEASE_LABEL);
            let placeholders = Placeholders::from_context(ctx, &anchor.commit.hash, count)?;
            pre_release = Some(placeholders.substitute("pre-release label", template, diagnostics));
            baseline
        }
        BumpStrategy::Conventional => {
            match classify(commits_since.iter().map(|c| c.message.as_str())) {
                Some(bump) => baseline.bump(bump)?,
                None => baseline,
            }
        }
        BumpStrategy::Unchanged => baseline,
    };

    debug!(
        baseline = %baseline,
        version = %version,
        strategy = %matched.strategy,
        count,
        "version calculated"
    );

    Ok(ResolvedVersion {
        version,
        pre_release,
        commits_since_anchor: count,
        anchor_hash: anchor.commit.hash.clone(),
        head_hash: head.hash.clone(),
        anchor_assumed: anchor.is_assumed(),
        strategy: matched.strategy,
    })
}
