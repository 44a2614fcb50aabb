use thiserror::Error;

/// Unified error type for git-flexver operations
#[derive(Error, Debug)]
pub enum FlexVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("Empty history: no commits available to version")]
    EmptyHistory,

    #[error("Invalid baseline version: {0}")]
    InvalidBaselineVersion(String),

    #[error("Invalid commit history: {0}")]
    InvalidHistory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-flexver
pub type Result<T> = std::result::Result<T, FlexVersionError>;

impl FlexVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FlexVersionError::ConfigurationInvalid(msg.into())
    }

    /// Create a baseline version error with context
    pub fn baseline(msg: impl Into<String>) -> Self {
        FlexVersionError::InvalidBaselineVersion(msg.into())
    }

    /// Create a commit history error with context
    pub fn history(msg: impl Into<String>) -> Self {
        FlexVersionError::InvalidHistory(msg.into())
    }
}

impl From<toml::de::Error> for FlexVersionError {
    fn from(err: toml::de::Error) -> Self {
        FlexVersionError::ConfigurationInvalid(err.to_string())
    }
}
