//! Domain logic - pure versioning rules independent of git access

pub mod branch;
pub mod commit;
pub mod context;
pub mod conventional;
pub mod strategy;
pub mod version;

pub use branch::{BranchPattern, BranchRule, PatternSyntax};
pub use commit::{Commit, CommitLog};
pub use context::RepositoryContext;
pub use conventional::ParsedCommit;
pub use strategy::BumpStrategy;
pub use version::{Version, VersionBump};
