//! Authenticated Automower Connect client.

use automower_api::endpoint::Endpoint;
use automower_api::{ApiRoots, Authenticator, Token, WebAuthenticator, status};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::Result;
use crate::mower::{Mower, decode_mowers};

/// Header naming the identity provider that issued the token.
pub const AUTHORIZATION_PROVIDER_HEADER: &str = "Authorization-Provider";

/// Provider identifier sent in [`AUTHORIZATION_PROVIDER_HEADER`].
pub const PROVIDER_ID: &str = "husqvarna";

/// Header carrying the application key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the Automower Connect data API.
///
/// Holds the application credentials and the most recent token. Authenticating
/// takes `&mut self`; data calls borrow the client and read the token once at
/// the start of each call.
#[derive(Debug, Clone)]
pub struct AutomowerClient {
    credentials: Credentials,
    authenticator: Authenticator,
}

impl AutomowerClient {
    /// Creates a client against the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the production roots cannot be parsed.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self::with_roots(credentials, ApiRoots::husqvarna()?))
    }

    /// Creates a client against custom API roots.
    #[must_use]
    pub fn with_roots(credentials: Credentials, roots: ApiRoots) -> Self {
        let authenticator = Authenticator::new(
            credentials.application_key(),
            credentials.application_secret(),
            roots,
        );
        Self {
            credentials,
            authenticator,
        }
    }

    /// Uses the given HTTP client for authentication and data calls.
    #[must_use]
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.authenticator = self.authenticator.with_http_client(http_client);
        self
    }

    /// Application credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The most recently obtained token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.authenticator.token()
    }

    /// Authenticates with the client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns the API error if the token request fails.
    pub async fn authenticate_client_credentials(&mut self) -> Result<&Token> {
        Ok(self.authenticator.authenticate_client_credentials().await?)
    }

    /// Authenticates with the authorization-code grant.
    ///
    /// # Errors
    ///
    /// Returns the API error if the interactive session, the callback or the
    /// token request fails.
    pub async fn authenticate_authorization_code<W>(
        &mut self,
        web_authenticator: &W,
        redirect_uri: &str,
    ) -> Result<&Token>
    where
        W: WebAuthenticator + ?Sized,
    {
        Ok(self
            .authenticator
            .authenticate_authorization_code(web_authenticator, redirect_uri)
            .await?)
    }

    /// Fetches every mower linked to the account.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without any request if no token was obtained,
    /// the classified status error, or `CannotDecode` with the raw body.
    pub async fn fetch_mowers(&self) -> Result<Vec<Mower>> {
        let bearer = self
            .token()
            .ok_or(automower_api::Error::NotLoggedIn)?
            .bearer();

        let response = Endpoint::list_mowers()
            .request(self.authenticator.http_client(), self.authenticator.roots())?
            .header(AUTHORIZATION, bearer)
            .header(AUTHORIZATION_PROVIDER_HEADER, PROVIDER_ID)
            .header(API_KEY_HEADER, self.credentials.application_key())
            .send()
            .await
            .map_err(automower_api::Error::from)?;
        let body = status::into_body(response).await?;

        let mowers = decode_mowers(&body)?;
        info!(count = mowers.len(), "Fetched mowers");
        debug!(ids = ?mowers.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), "Mower ids");
        Ok(mowers)
    }

    /// Fetches the names of every mower, in response order.
    ///
    /// # Errors
    ///
    /// Same as [`AutomowerClient::fetch_mowers`].
    pub async fn fetch_mower_names(&self) -> Result<Vec<String>> {
        Ok(self
            .fetch_mowers()
            .await?
            .into_iter()
            .map(|mower| mower.name)
            .collect())
    }
}
