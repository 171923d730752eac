//! `OAuth2` grants and the token exchange they share.

mod code;

pub use code::{CallbackParams, WebAuthenticator, authorization_url, callback_scheme};

use crate::endpoint::{ApiRoots, Endpoint};
use crate::error::Result;
use crate::status;
use crate::token::Token;
use reqwest::Client;
use tracing::{debug, info};

/// The grant used to obtain a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// Service-to-service grant using only the application key and secret.
    ClientCredentials,
    /// User-interactive grant, after the consent screen returned a code.
    AuthorizationCode {
        /// Code from the authorization callback.
        code: String,
        /// State from the authorization callback.
        state: String,
        /// Redirect URI used for the consent screen.
        redirect_uri: String,
    },
}

impl Grant {
    /// Returns the `grant_type` sent to the token endpoint.
    #[must_use]
    pub const fn grant_type(&self) -> &'static str {
        match self {
            Self::ClientCredentials => "client_credentials",
            Self::AuthorizationCode { .. } => "authorization_code",
        }
    }

    /// Builds the token endpoint request for this grant.
    #[must_use]
    pub fn endpoint(&self, client_id: &str, client_secret: &str) -> Endpoint {
        match self {
            Self::ClientCredentials => Endpoint::token_client_credentials(client_id, client_secret),
            Self::AuthorizationCode {
                code,
                state,
                redirect_uri,
            } => Endpoint::token_authorization_code(
                client_id,
                client_secret,
                code,
                redirect_uri,
                state,
            ),
        }
    }
}

/// Obtains tokens and keeps the most recent one.
///
/// The stored token is replaced on every successful grant and never merged
/// with the previous one.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client_id: String,
    client_secret: String,
    roots: ApiRoots,
    http_client: Client,
    token: Option<Token>,
}

impl Authenticator {
    /// Creates an authenticator without a token.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        roots: ApiRoots,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            roots,
            http_client: Client::new(),
            token: None,
        }
    }

    /// Uses the given HTTP client for every request.
    #[must_use]
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Application key used as `client_id`.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// API roots requests resolve against.
    #[must_use]
    pub const fn roots(&self) -> &ApiRoots {
        &self.roots
    }

    /// HTTP client shared with authenticated calls.
    #[must_use]
    pub const fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// The most recently obtained token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Runs the client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns the classified status error, `Error::CannotDecode` for an
    /// unreadable body, or `Error::Http` on transport failure.
    pub async fn authenticate_client_credentials(&mut self) -> Result<&Token> {
        self.exchange(&Grant::ClientCredentials).await
    }

    /// Runs the authorization-code grant through an interactive session.
    ///
    /// # Errors
    ///
    /// Returns `Error::General` if the interactive session fails,
    /// `Error::ReceivedInvalidResponse` if the callback lacks `code` or
    /// `state`, and otherwise the same errors as the token exchange.
    pub async fn authenticate_authorization_code<W>(
        &mut self,
        web_authenticator: &W,
        redirect_uri: &str,
    ) -> Result<&Token>
    where
        W: WebAuthenticator + ?Sized,
    {
        let grant = code::authorize(
            web_authenticator,
            &self.roots,
            &self.client_id,
            redirect_uri,
        )
        .await?;
        self.exchange(&grant).await
    }

    /// Exchanges a grant for a token and stores it.
    ///
    /// # Errors
    ///
    /// Returns the classified status error, `Error::CannotDecode` for an
    /// unreadable body, or `Error::Http` on transport failure.
    pub async fn exchange(&mut self, grant: &Grant) -> Result<&Token> {
        debug!(grant_type = grant.grant_type(), "Requesting access token");

        let response = grant
            .endpoint(&self.client_id, &self.client_secret)
            .request(&self.http_client, &self.roots)?
            .send()
            .await?;
        let body = status::into_body(response).await?;
        let token = Token::decode(&body)?;

        info!(
            grant_type = grant.grant_type(),
            valid_until = %token.valid_until,
            "Obtained access token"
        );
        Ok(&*self.token.insert(token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticator_creation() {
        let auth = Authenticator::new("key", "secret", ApiRoots::husqvarna().unwrap());
        assert_eq!(auth.client_id(), "key");
        assert!(auth.token().is_none());
    }

    #[test]
    fn test_grant_endpoints_share_token_path() {
        let code = Grant::AuthorizationCode {
            code: "c".to_string(),
            state: "s".to_string(),
            redirect_uri: "app://cb".to_string(),
        };
        let credentials = Grant::ClientCredentials.endpoint("key", "secret");
        let authorization = code.endpoint("key", "secret");

        assert_eq!(credentials.path, authorization.path);
        assert_eq!(credentials.body_field("grant_type"), Some("client_credentials"));
        assert_eq!(authorization.body_field("grant_type"), Some("authorization_code"));
        assert_eq!(authorization.body_field("code"), Some("c"));
        assert_eq!(authorization.body_field("state"), Some("s"));
        assert_eq!(authorization.body_field("redirect_uri"), Some("app://cb"));
    }
}
