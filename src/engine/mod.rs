//! Version resolution engine
//!
//! Wires the four stages together: anchor resolution, branch matching,
//! version calculation and output rendering. A run is a pure function of
//! the commit log, the branch name and the [`RuleSet`]; fatal errors
//! return nothing partial, non-fatal [`Diagnostic`]s travel with the result.

pub mod anchor;
pub mod calculator;
pub mod matcher;
pub mod renderer;

pub use anchor::{resolve_anchor, Anchor, AnchorOrigin, AnchorRule};
pub use calculator::{calculate, ResolvedVersion};
pub use matcher::{match_branch, MatchedStrategy};
pub use renderer::{render_outputs, CleanRule, OutputTemplate, RenderedOutput};

use crate::config::RuleSet;
use crate::diagnostics::Diagnostic;
use crate::domain::{CommitLog, RepositoryContext};
use crate::error::Result;
use tracing::info;

/// Successful result of one resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    /// Rendered outputs in declared order
    pub outputs: Vec<RenderedOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Look up a rendered output by name
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }
}

/// Resolves versions against one immutable rule set
pub struct Engine<'r> {
    rules: &'r RuleSet,
}

impl<'r> Engine<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Engine { rules }
    }

    pub fn resolve(&self, path: &str, branch_name: &str, log: &CommitLog) -> Result<Resolution> {
        let mut diagnostics = Vec::new();

        let anchor = resolve_anchor(&self.rules.anchor, log)?;
        if anchor.is_assumed() {
            diagnostics.push(Diagnostic::AnchorAssumed {
                hash: anchor.commit.hash.clone(),
            });
        }

        let ctx = RepositoryContext::new(path, branch_name, anchor.log_to_version_source());
        let matched = match_branch(
            &self.rules.branches,
            self.rules.default_strategy,
            branch_name,
        );

        let version = calculate(
            &ctx,
            &anchor,
            &matched,
            &self.rules.baseline,
            &mut diagnostics,
        )?;

        let outputs = render_outputs(
            &version,
            &ctx,
            &self.rules.outputs,
            &self.rules.clean_rules,
            &mut diagnostics,
        )?;

        info!(
            version = %version.semver(),
            branch = branch_name,
            count = version.commits_since_anchor,
            "version resolved"
        );

        Ok(Resolution {
            version,
            outputs,
            diagnostics,
        })
    }
}
