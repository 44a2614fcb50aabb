pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod ui;

pub use config::{Config, RuleSet};
pub use diagnostics::Diagnostic;
pub use engine::{Engine, Resolution, ResolvedVersion};
pub use error::{FlexVersionError, Result};
