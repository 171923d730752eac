//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// API call or authentication failed.
    #[error(transparent)]
    Api(#[from] automower_api::Error),

    /// No credentials were found in any configured source.
    #[error("Cannot find credentials: {0}")]
    CannotFindBundle(String),

    /// Credential file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),
}

impl Error {
    /// Returns true if the caller should authenticate again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Api(e) if e.requires_login())
    }

    /// Returns true if retrying or re-authenticating will not help.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_fatal())
    }

    /// Returns the underlying API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&automower_api::Error> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
