//! Application credentials model.

use serde::{Deserialize, Serialize};

/// Application key and secret issued by the Husqvarna developer portal.
///
/// The key doubles as the OAuth2 `client_id` and as the `X-Api-Key` header
/// of every data call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    application_key: String,
    application_secret: String,
}

impl Credentials {
    /// Creates credentials from a key and secret.
    #[must_use]
    pub fn new(application_key: impl Into<String>, application_secret: impl Into<String>) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
        }
    }

    /// Application key.
    #[must_use]
    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    /// Application secret.
    #[must_use]
    pub fn application_secret(&self) -> &str {
        &self.application_secret
    }

    /// Returns true if both values are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.application_key.is_empty() && !self.application_secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("application_key", &self.application_key)
            .field("application_secret", &"<redacted>")
            .finish()
    }
}
