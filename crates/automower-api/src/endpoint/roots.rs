//! API root configuration.

use crate::error::{Error, Result};
use url::Url;

/// Production authentication root.
pub const AUTHENTICATION_ROOT: &str = "https://api.authentication.husqvarnagroup.dev";

/// Production Automower Connect data root.
pub const DATA_ROOT: &str = "https://api.amc.husqvarna.dev";

/// Selects which API root an endpoint is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    /// The OAuth2 authentication service.
    Authentication,
    /// The Automower Connect data service.
    Data,
}

/// The pair of roots every endpoint resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoots {
    /// Authentication service root.
    pub authentication: Url,
    /// Data service root.
    pub data: Url,
}

impl ApiRoots {
    /// Creates a root configuration from two base URLs.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if either URL is invalid or cannot carry a path.
    pub fn new(authentication: impl AsRef<str>, data: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            authentication: parse_root(authentication.as_ref())?,
            data: parse_root(data.as_ref())?,
        })
    }

    /// Production Husqvarna roots.
    ///
    /// # Errors
    ///
    /// Returns an error if URL parsing fails.
    pub fn husqvarna() -> Result<Self> {
        Self::new(AUTHENTICATION_ROOT, DATA_ROOT)
    }

    /// Uses the same root for both services, as a local mock server does.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the URL is invalid.
    pub fn single(root: impl AsRef<str>) -> Result<Self> {
        let root = parse_root(root.as_ref())?;
        Ok(Self {
            authentication: root.clone(),
            data: root,
        })
    }

    /// Returns the root for the given host selector.
    #[must_use]
    pub const fn base(&self, host: Host) -> &Url {
        match host {
            Host::Authentication => &self.authentication,
            Host::Data => &self.data,
        }
    }
}

fn parse_root(root: &str) -> Result<Url> {
    let url = Url::parse(root).map_err(|_| Error::InvalidUrl(root.to_string()))?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(Error::InvalidUrl(root.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_husqvarna_roots() {
        let roots = ApiRoots::husqvarna().unwrap();
        assert_eq!(
            roots.base(Host::Authentication).host_str(),
            Some("api.authentication.husqvarnagroup.dev")
        );
        assert_eq!(roots.base(Host::Data).host_str(), Some("api.amc.husqvarna.dev"));
    }

    #[test]
    fn test_single_root() {
        let roots = ApiRoots::single("http://127.0.0.1:8080").unwrap();
        assert_eq!(roots.authentication, roots.data);
    }

    #[test]
    fn test_invalid_root() {
        assert!(matches!(
            ApiRoots::new("not a url", DATA_ROOT),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiRoots::new(AUTHENTICATION_ROOT, "mailto:someone@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
