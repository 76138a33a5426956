//! Error types for session creation, navigation and page operations.

use crate::config::error::ConfigError;
use thiserror::Error;

/// Error raised by a project hook, passed through untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the browser transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Page or context has been closed
    #[error("Target closed: {0}")]
    Closed(String),
    /// Navigation did not complete
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// Any other protocol-level failure
    #[error("Protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration document could not be parsed
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Configuration value present but unusable
    #[error("Invalid value for '{key}': {value} ({reason})")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },
    /// Geolocation value malformed or out of range
    #[error("Invalid geolocation: {0}")]
    InvalidGeolocation(String),
    /// No URL could be resolved for a page name
    #[error("No page URL configured for '{0}'")]
    MissingPageUrl(String),
    /// Project hook failed
    #[error("{0}")]
    Hook(#[source] BoxError),
    /// Browser transport failed
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Stored cookie set could not be decoded
    #[error("Stored cookies are malformed: {0}")]
    StoredCookies(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Hook error as raised by the hook, if this is one.
    pub fn into_hook_error(self) -> Option<BoxError> {
        match self {
            Error::Hook(err) => Some(err),
            _ => None,
        }
    }
}
