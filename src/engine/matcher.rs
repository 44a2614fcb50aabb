use crate::domain::context::short_branch_name;
use crate::domain::{BranchRule, BumpStrategy};
use tracing::debug;

/// Outcome of matching a branch against the rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedStrategy<'r> {
    pub strategy: BumpStrategy,
    /// Pre-release label template of the matched rule
    pub label: Option<&'r str>,
    /// Index of the matched rule, `None` when the default applied
    pub rule_index: Option<usize>,
}

impl MatchedStrategy<'_> {
    pub fn is_default(&self) -> bool {
        self.rule_index.is_none()
    }
}

/// Select the first rule whose pattern matches the full or short branch
/// name, in list order. Falls back to `default` when nothing matches.
pub fn match_branch<'r>(
    rules: &'r [BranchRule],
    default: BumpStrategy,
    branch_name: &str,
) -> MatchedStrategy<'r> {
    let short_name = short_branch_name(branch_name);

    match rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(branch_name, short_name))
    {
        Some((index, rule)) => {
            debug!(
                branch = branch_name,
                pattern = %rule.pattern.source,
                strategy = %rule.strategy,
                "branch rule matched"
            );
            MatchedStrategy {
                strategy: rule.strategy,
                label: rule.label.as_deref(),
                rule_index: Some(index),
            }
        }
        None => {
            debug!(branch = branch_name, strategy = %default, "no branch rule matched, using default");
            MatchedStrategy {
                strategy: default,
                label: None,
                rule_index: None,
            }
        }
    }
}
