use crate::template::TemplateError;
use thiserror::Error;

/// Unified error type for git-verinfo operations
#[derive(Error, Debug)]
pub enum VerinfoError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Missing or unreadable repository. Callers treat this as a warning.
    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Template format error: {0}")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-verinfo
pub type Result<T> = std::result::Result<T, VerinfoError>;

impl VerinfoError {
    /// Create an argument error with context
    pub fn argument(msg: impl Into<String>) -> Self {
        VerinfoError::Argument(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        VerinfoError::RepositoryUnavailable(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VerinfoError::Config(msg.into())
    }

    /// Whether the generate workflow may continue with fallback values
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VerinfoError::RepositoryUnavailable(_))
    }
}

impl From<git2::Error> for VerinfoError {
    fn from(err: git2::Error) -> Self {
        VerinfoError::RepositoryUnavailable(err.message().to_string())
    }
}

impl From<toml::de::Error> for VerinfoError {
    fn from(err: toml::de::Error) -> Self {
        VerinfoError::Config(err.to_string())
    }
}
