//! Error types for step parameter handling.

use pagestub_core::config::error::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StepError>;

#[derive(Debug, Error)]
pub enum StepError {
    /// Required step parameter absent
    #[error("Missing step parameter '{0}'")]
    MissingParameter(String),
    /// Step parameter present but unusable
    #[error("Invalid step parameter '{key}': {value} ({reason})")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },
    /// Mock file pattern is not a valid glob
    #[error("Invalid mock file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// Matched path could not be read while expanding a pattern
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    /// Mock case file could not be loaded
    #[error("Failed to load mock cases from {path}: {source}")]
    MockLoad {
        path: String,
        #[source]
        source: ConfigError,
    },
    #[error(transparent)]
    Core(#[from] pagestub_core::Error),
}

impl StepError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StepError::InvalidParameter {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
