//! Error types for Automower Connect API operations.

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by injected collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request components could not be composed into a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The authorization callback was missing `code` or `state`.
    #[error("Received invalid response from the authorization callback")]
    ReceivedInvalidResponse,

    /// The server answered with HTTP 400.
    #[error("Bad request")]
    BadRequest,

    /// The server answered with HTTP 401.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server answered with an unexpected status code.
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// A successful response body could not be decoded.
    #[error("Cannot decode response body: {source} (body: {body})")]
    CannotDecode {
        /// Raw response body as received.
        body: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// An authenticated call was attempted before any token was obtained.
    #[error("Not logged in")]
    NotLoggedIn,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected failure from an underlying collaborator.
    #[error("General error: {0}")]
    General(#[source] BoxError),
}

impl Error {
    /// Creates a decode error that keeps the raw body for diagnosis.
    #[must_use]
    pub fn cannot_decode(body: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CannotDecode {
            body: body.into(),
            source,
        }
    }

    /// Returns true if the caller should authenticate again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotLoggedIn)
    }

    /// Returns true if the error is not recoverable by re-authenticating or retrying.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::CannotDecode { .. } | Self::InvalidStatusCode(_))
    }
}
