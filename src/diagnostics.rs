use crate::domain::commit::short_hash;
use std::fmt;

/// Non-fatal conditions collected during a resolution run.
/// They never abort the run and are returned alongside the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No commit matched the anchor rule; the oldest commit was used
    AnchorAssumed { hash: String },
    /// A template referenced a token the renderer does not know
    UnmatchedPlaceholder { template: String, token: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AnchorAssumed { hash } => write!(
                f,
                "No version source found, assuming oldest commit {}",
                short_hash(hash)
            ),
            Diagnostic::UnmatchedPlaceholder { template, token } => write!(
                f,
                "Unknown placeholder '{{{}}}' in '{}' left as-is",
                token, template
            ),
        }
    }
}
