//! Main workflow orchestration logic
//!
//! Keeps CLI argument parsing in `main.rs` and the resolve workflow here, so
//! the workflow can be driven programmatically without depending on clap.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::config::{self, RuleSet, LOCAL_CONFIG_FILE};
use crate::engine::{Engine, RenderedOutput, Resolution};
use crate::git::{CommitSource, Git2Repository};

/// Arguments for the resolve workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Directory inside the repository to version
    pub repo_path: PathBuf,

    /// Branch name to use instead of the checked-out one
    pub branch: Option<String>,

    /// Stop reading history after this many commits
    pub max_commits: Option<usize>,
}

/// Result of a successful resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The branch the version was resolved for
    pub branch: String,

    pub resolution: Resolution,
}

/// Pick the configuration file: the explicit one, else `flexver.toml` at
/// the repository root, else the regular lookup.
fn config_path_for(args: &WorkflowArgs, repo_root: &Path) -> Option<PathBuf> {
    args.config_path.clone().or_else(|| {
        let candidate = repo_root.join(LOCAL_CONFIG_FILE);
        candidate.exists().then_some(candidate)
    })
}

/// Main resolve workflow
///
/// 1. Open the repository
/// 2. Load and validate configuration
/// 3. Read branch name and commit log
/// 4. Resolve the version and render outputs
pub fn run_workflow(args: &WorkflowArgs) -> Result<WorkflowResult> {
    let repo = Git2Repository::open(&args.repo_path)
        .with_context(|| format!("Not in a git repository: {}", args.repo_path.display()))?;

    let repo_root = PathBuf::from(repo.path());
    let config_path = config_path_for(args, &repo_root);
    let config = config::load_config(config_path.as_deref()).context("Error loading config")?;
    let rules = config.validate().context("Invalid configuration")?;

    resolve_from_source(&repo, &rules, args.branch.as_deref(), args.max_commits)
}

/// Resolve against any [`CommitSource`] with an already validated rule set
pub fn resolve_from_source<S: CommitSource>(
    source: &S,
    rules: &RuleSet,
    branch_override: Option<&str>,
    max_commits: Option<usize>,
) -> Result<WorkflowResult> {
    let branch = match branch_override {
        Some(branch) => branch.to_string(),
        None => source.branch_name().context("Failed to read current branch")?,
    };

    let log = source
        .commit_log(max_commits)
        .context("Failed to read commit history")?;
    debug!(branch = %branch, commits = log.len(), "inputs collected");

    let resolution = Engine::new(rules)
        .resolve(&source.path(), &branch, &log)
        .with_context(|| format!("Failed to resolve version for branch '{}'", branch))?;

    Ok(WorkflowResult { branch, resolution })
}

/// Pick outputs by name, in the order requested; all outputs when `names`
/// is empty.
pub fn select_outputs<'a>(
    resolution: &'a Resolution,
    names: &[String],
) -> Result<Vec<&'a RenderedOutput>> {
    if names.is_empty() {
        return Ok(resolution.outputs.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            resolution
                .outputs
                .iter()
                .find(|o| &o.name == name)
                .ok_or_else(|| anyhow!("Unknown output '{}'", name))
        })
        .collect()
}
