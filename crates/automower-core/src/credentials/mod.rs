//! Application credential loading.
//!
//! Credentials are looked up, in order, from environment variables, a JSON
//! file in the user's config directory, and the system keyring.

mod model;
pub mod store;

pub use model::Credentials;
pub use store::{CredentialError, CredentialResult};

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable holding the application key.
pub const KEY_VAR: &str = "AUTOMOWER_APP_KEY";

/// Environment variable holding the application secret.
pub const SECRET_VAR: &str = "AUTOMOWER_APP_SECRET";

/// Default location of the credentials file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("automower")
        .join("credentials.json")
}

impl Credentials {
    /// Reads credentials from `AUTOMOWER_APP_KEY` and `AUTOMOWER_APP_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CannotFindBundle` if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup).ok_or_else(missing_env)
    }

    /// Builds credentials from a variable lookup, if both values are present.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let credentials = Self::new(lookup(KEY_VAR)?, lookup(SECRET_VAR)?);
        credentials.is_complete().then_some(credentials)
    }

    /// Reads credentials from a JSON file.
    ///
    /// The file holds `{"applicationKey": "...", "applicationSecret": "..."}`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CannotFindBundle` if the file does not exist or is
    /// incomplete, `Error::Config` if it is not valid JSON, or `Error::Io`.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CannotFindBundle(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let credentials: Self = serde_json::from_str(&contents)?;
        if !credentials.is_complete() {
            return Err(Error::CannotFindBundle(format!(
                "{} is missing the application key or secret",
                path.display()
            )));
        }

        debug!("Loaded credentials from {}", path.display());
        Ok(credentials)
    }

    /// Writes credentials to a JSON file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        tracing::info!("Credentials saved to {:?}", path);
        Ok(())
    }

    /// Loads credentials from the environment, the default file or the keyring.
    ///
    /// # Errors
    ///
    /// Returns `Error::CannotFindBundle` if no source has credentials.
    pub async fn load() -> Result<Self> {
        Self::load_with(default_config_path()).await
    }

    /// Like [`Credentials::load`], with an explicit credentials file.
    ///
    /// # Errors
    ///
    /// Returns `Error::CannotFindBundle` if no source has credentials, or the
    /// file's parse or I/O error if it exists but cannot be read.
    pub async fn load_with(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from(env_lookup, config_path, store::load_credentials).await
    }

    /// Runs the lookup chain over explicit sources.
    ///
    /// The keyring source runs on the blocking pool. A keyring failure is
    /// logged and treated as "not found"; a malformed file is not.
    async fn load_from<K>(
        lookup: impl Fn(&str) -> Option<String>,
        config_path: impl AsRef<Path>,
        keyring: K,
    ) -> Result<Self>
    where
        K: FnOnce() -> CredentialResult<Option<Self>> + Send + 'static,
    {
        if let Some(credentials) = Self::from_lookup(lookup) {
            debug!("Using credentials from environment");
            return Ok(credentials);
        }

        let config_path = config_path.as_ref();
        match Self::from_file(config_path).await {
            Ok(credentials) => return Ok(credentials),
            Err(Error::CannotFindBundle(reason)) => debug!("No credentials file: {reason}"),
            Err(e) => return Err(e),
        }

        match tokio::task::spawn_blocking(keyring).await {
            Ok(Ok(Some(credentials))) => {
                debug!("Using credentials from keyring");
                return Ok(credentials);
            }
            Ok(Ok(None)) => {}
            Ok(Err(e)) => warn!("Failed to load credentials from keyring: {e}"),
            Err(e) => warn!("Keyring lookup task failed: {e}"),
        }

        Err(Error::CannotFindBundle(format!(
            "set {KEY_VAR} and {SECRET_VAR}, create {}, or store them in the keyring",
            config_path.display()
        )))
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn missing_env() -> Error {
    Error::CannotFindBundle(format!("{KEY_VAR} and {SECRET_VAR} must both be set"))
}
