//! Request descriptors for every API operation.
//!
//! An [`Endpoint`] is built per call and describes a request before it is
//! sent: which root it targets, its path, query items, method and an optional
//! form-encoded body. Nothing here touches the network.

mod roots;

pub use roots::{AUTHENTICATION_ROOT, ApiRoots, DATA_ROOT, Host};

use crate::error::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use url::{Url, form_urlencoded};

/// Authorization (consent screen) path on the authentication root.
pub const AUTHORIZE_PATH: &str = "/v1/oauth2/authorize";

/// Token exchange path on the authentication root.
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

/// Mower listing path on the data root.
pub const MOWERS_PATH: &str = "/v1/mowers";

/// Content type of both grant request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

/// An HTTP request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Root the path is resolved against.
    pub host: Host,
    /// Absolute path, starting with `/`.
    pub path: String,
    /// Query items, in order.
    pub query: Vec<(String, String)>,
    /// HTTP method.
    pub method: Method,
    /// Form fields sent as an `application/x-www-form-urlencoded` body.
    pub body: Option<Vec<(String, String)>>,
}

impl Endpoint {
    /// Consent screen URL parameters for the authorization-code grant.
    #[must_use]
    pub fn authorize(client_id: &str, redirect_uri: &str) -> Self {
        Self {
            host: Host::Authentication,
            path: AUTHORIZE_PATH.to_string(),
            query: pairs(&[("client_id", client_id), ("redirect_uri", redirect_uri)]),
            method: Method::Get,
            body: None,
        }
    }

    /// Token request for the client-credentials grant.
    #[must_use]
    pub fn token_client_credentials(client_id: &str, client_secret: &str) -> Self {
        Self::token(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
    }

    /// Token request for the authorization-code grant.
    #[must_use]
    pub fn token_authorization_code(
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
        state: &str,
    ) -> Self {
        Self::token(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("state", state),
        ])
    }

    /// Lists every mower linked to the authenticated account.
    #[must_use]
    pub fn list_mowers() -> Self {
        Self {
            host: Host::Data,
            path: MOWERS_PATH.to_string(),
            query: Vec::new(),
            method: Method::Get,
            body: None,
        }
    }

    fn token(fields: &[(&str, &str)]) -> Self {
        Self {
            host: Host::Authentication,
            path: TOKEN_PATH.to_string(),
            query: Vec::new(),
            method: Method::Post,
            body: Some(pairs(fields)),
        }
    }

    /// Renders the full URL against the given roots.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the path does not compose into a URL on
    /// the selected root.
    pub fn url(&self, roots: &ApiRoots) -> Result<Url> {
        let base = roots.base(self.host);
        let invalid = || Error::InvalidUrl(self.path.clone());

        if !self.path.starts_with('/') {
            return Err(invalid());
        }

        let mut url = base.join(&self.path).map_err(|_| invalid())?;

        // The path must stay on the selected root and must not smuggle in a
        // query or fragment of its own.
        if url.host() != base.host()
            || url.port_or_known_default() != base.port_or_known_default()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(invalid());
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }

    /// Returns the percent-encoded form body, if the endpoint has one.
    #[must_use]
    pub fn form_body(&self) -> Option<String> {
        self.body.as_ref().map(|fields| {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields)
                .finish()
        })
    }

    /// Looks up a form field by name.
    #[must_use]
    pub fn body_field(&self, name: &str) -> Option<&str> {
        self.body
            .as_ref()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds a `reqwest` request for this endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the URL cannot be rendered.
    pub fn request(&self, http_client: &Client, roots: &ApiRoots) -> Result<RequestBuilder> {
        let url = self.url(roots)?;
        let builder = match self.method {
            Method::Get => http_client.get(url),
            Method::Post => http_client.post(url),
        };

        Ok(match self.form_body() {
            Some(body) => builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body),
            None => builder,
        })
    }
}

fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}
