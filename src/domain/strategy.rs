use serde::{Deserialize, Serialize};
use std::fmt;

/// How the version components change for a matched branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpStrategy {
    /// Increment major, reset minor and patch
    Major,
    /// Increment minor, reset patch
    Minor,
    /// Increment patch
    Patch,
    /// Keep release numbers, attach a branch/count pre-release label
    Prerelease,
    /// Derive major/minor/patch from the commits since the anchor
    Conventional,
    /// Leave the baseline untouched
    #[serde(rename = "none", alias = "custom", alias = "default")]
    Unchanged,
}

impl fmt::Display for BumpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpStrategy::Major => "major",
            BumpStrategy::Minor => "minor",
            BumpStrategy::Patch => "patch",
            BumpStrategy::Prerelease => "prerelease",
            BumpStrategy::Conventional => "conventional",
            BumpStrategy::Unchanged => "none",
        };
        f.write_str(name)
    }
}
