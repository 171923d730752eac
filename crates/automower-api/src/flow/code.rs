//! Authorization-code grant: consent screen and callback handling.

use super::Grant;
use crate::endpoint::{ApiRoots, Endpoint};
use crate::error::{BoxError, Error, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Interactive authentication session.
///
/// Implementations drive the user through the consent screen at
/// `authorization_url` and return the final redirect URL, whose scheme is
/// `callback_scheme`. They fail if the user cancels or the session errors.
#[async_trait]
pub trait WebAuthenticator: Send + Sync {
    /// Runs the session and returns the callback URL.
    async fn authenticate(
        &self,
        authorization_url: &Url,
        callback_scheme: &str,
    ) -> std::result::Result<Url, BoxError>;
}

/// Parameters carried by the authorization callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code.
    pub code: String,
    /// Opaque state echoed back by the server.
    pub state: String,
}

impl CallbackParams {
    /// Extracts `code` and `state` from a callback URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReceivedInvalidResponse` if either is missing or empty.
    pub fn from_callback(callback: &Url) -> Result<Self> {
        let mut code = None;
        let mut state = None;

        for (key, value) in callback.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        match (code, state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Ok(Self { code, state })
            }
            _ => Err(Error::ReceivedInvalidResponse),
        }
    }
}

/// Builds the consent screen URL.
///
/// # Errors
///
/// Returns `Error::InvalidUrl` if the URL cannot be composed.
pub fn authorization_url(roots: &ApiRoots, client_id: &str, redirect_uri: &str) -> Result<Url> {
    Endpoint::authorize(client_id, redirect_uri).url(roots)
}

/// Returns the scheme the interactive session should wait for.
///
/// # Errors
///
/// Returns `Error::InvalidUrl` if the redirect URI is not an absolute URL.
pub fn callback_scheme(redirect_uri: &str) -> Result<String> {
    Url::parse(redirect_uri)
        .map(|url| url.scheme().to_string())
        .map_err(|_| Error::InvalidUrl(redirect_uri.to_string()))
}

/// Runs the interactive session and turns its callback into a grant.
pub(super) async fn authorize<W>(
    web_authenticator: &W,
    roots: &ApiRoots,
    client_id: &str,
    redirect_uri: &str,
) -> Result<Grant>
where
    W: WebAuthenticator + ?Sized,
{
    let url = authorization_url(roots, client_id, redirect_uri)?;
    let scheme = callback_scheme(redirect_uri)?;

    debug!(%scheme, "Starting interactive authentication");
    let callback = web_authenticator
        .authenticate(&url, &scheme)
        .await
        .map_err(Error::General)?;

    let CallbackParams { code, state } = CallbackParams::from_callback(&callback)?;
    Ok(Grant::AuthorizationCode {
        code,
        state,
        redirect_uri: redirect_uri.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        callback: &'static str,
        seen: Mutex<Option<(Url, String)>>,
    }

    #[async_trait]
    impl WebAuthenticator for Recording {
        async fn authenticate(
            &self,
            authorization_url: &Url,
            callback_scheme: &str,
        ) -> std::result::Result<Url, BoxError> {
            *self.seen.lock().unwrap() =
                Some((authorization_url.clone(), callback_scheme.to_string()));
            Ok(Url::parse(self.callback)?)
        }
    }

    struct Cancelled;

    #[async_trait]
    impl WebAuthenticator for Cancelled {
        async fn authenticate(&self, _: &Url, _: &str) -> std::result::Result<Url, BoxError> {
            Err("user cancelled".into())
        }
    }

    #[test]
    fn test_callback_params() {
        let url = Url::parse("automower://callback?code=abc&state=xyz").unwrap();
        let params = CallbackParams::from_callback(&url).unwrap();
        assert_eq!(params.code, "abc");
        assert_eq!(params.state, "xyz");
    }

    #[test]
    fn test_callback_missing_state() {
        let url = Url::parse("automower://callback?code=abc").unwrap();
        assert!(matches!(
            CallbackParams::from_callback(&url),
            Err(Error::ReceivedInvalidResponse)
        ));
    }

    #[test]
    fn test_callback_empty_code() {
        let url = Url::parse("automower://callback?code=&state=xyz").unwrap();
        assert!(matches!(
            CallbackParams::from_callback(&url),
            Err(Error::ReceivedInvalidResponse)
        ));
    }

    #[test]
    fn test_callback_scheme() {
        assert_eq!(callback_scheme("automower://callback").unwrap(), "automower");
        assert!(matches!(
            callback_scheme("not a uri"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_authorize_builds_grant() {
        let roots = ApiRoots::husqvarna().unwrap();
        let web = Recording {
            callback: "automower://callback?code=the-code&state=the-state",
            seen: Mutex::new(None),
        };

        let grant = authorize(&web, &roots, "app-key", "automower://callback")
            .await
            .unwrap();
        assert_eq!(
            grant,
            Grant::AuthorizationCode {
                code: "the-code".to_string(),
                state: "the-state".to_string(),
                redirect_uri: "automower://callback".to_string(),
            }
        );

        let (url, scheme) = web.seen.lock().unwrap().clone().unwrap();
        assert_eq!(scheme, "automower");
        assert!(url.as_str().contains("client_id=app-key"));
    }

    #[tokio::test]
    async fn test_authorize_cancelled() {
        let roots = ApiRoots::husqvarna().unwrap();
        let result = authorize(&Cancelled, &roots, "app-key", "automower://callback").await;
        assert!(matches!(result, Err(Error::General(_))));
    }
}
