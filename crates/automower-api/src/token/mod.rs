//! Access token types.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token obtained from the token endpoint.
///
/// Expiry is not enforced anywhere; callers compare [`Token::valid_until`]
/// themselves or use [`Token::is_expired`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer string sent on authenticated calls.
    pub access_token: String,
    /// Refresh token, when the grant returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Moment the token stops being accepted.
    pub valid_until: DateTime<Utc>,
    /// Scope granted by the authorization server.
    pub scope: String,
    /// Identity provider that issued the token.
    pub provider: String,
    /// Account the token belongs to.
    pub user_id: String,
    /// Token type (usually "Bearer").
    pub token_type: String,
}

impl Token {
    /// Creates a token from a token endpoint response, anchored at `now`.
    #[must_use]
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            valid_until: now + Duration::seconds(i64::from(response.expires_in)),
            scope: response.scope,
            provider: response.provider,
            user_id: response.user_id,
            token_type: response.token_type,
        }
    }

    /// Decodes a token endpoint response body.
    ///
    /// # Errors
    ///
    /// Returns `Error::CannotDecode` with the raw body if it is not a valid
    /// token response.
    pub fn decode(body: &str) -> Result<Self> {
        let response: TokenResponse =
            serde_json::from_str(body).map_err(|e| Error::cannot_decode(body, e))?;
        Ok(Self::from_response(response, Utc::now()))
    }

    /// Returns true once `valid_until` has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.valid_until
    }

    /// Returns the value of the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("valid_until", &self.valid_until)
            .field("scope", &self.scope)
            .field("provider", &self.provider)
            .field("user_id", &self.user_id)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Token response from the authentication service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: u32,
    /// Scope.
    pub scope: String,
    /// Issuing provider.
    pub provider: String,
    /// Account identifier.
    pub user_id: String,
    /// Token type.
    pub token_type: String,
}
