//! Credential storage using the system keyring.
//!
//! Stores the application key and secret in the platform's native
//! credential storage:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager

use keyring::Entry;
use tracing::{debug, warn};

use super::Credentials;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "automower";

/// Credential type identifier for the application key.
const APPLICATION_KEY: &str = "application_key";

/// Credential type identifier for the application secret.
const APPLICATION_SECRET: &str = "application_secret";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Generates the keyring entry key for a credential.
fn credential_key(credential_type: &str) -> String {
    format!("{SERVICE_NAME}_{credential_type}")
}

fn entry(credential_type: &str) -> CredentialResult<Entry> {
    Ok(Entry::new(SERVICE_NAME, &credential_key(credential_type))?)
}

fn get(credential_type: &str) -> CredentialResult<Option<String>> {
    match entry(credential_type)?.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => {
            debug!("No {credential_type} found in keyring");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn delete(credential_type: &str) -> CredentialResult<()> {
    delete_entry(&entry(credential_type)?, credential_type)
}

fn delete_entry(entry: &Entry, credential_type: &str) -> CredentialResult<()> {
    match entry.delete_credential() {
        Ok(()) => {
            debug!("Deleted {credential_type} from keyring");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => {
            debug!("No {credential_type} to delete from keyring");
            Ok(())
        }
        Err(e) => {
            warn!("Failed to delete {credential_type}: {e}");
            Err(e.into())
        }
    }
}

/// Writes both entries. The key entry is removed again if the secret
/// cannot be written, so the keyring never holds half a pair.
fn store_pair(key: &Entry, secret: &Entry, credentials: &Credentials) -> CredentialResult<()> {
    key.set_password(credentials.application_key())?;
    if let Err(e) = secret.set_password(credentials.application_secret()) {
        warn!("Failed to store {APPLICATION_SECRET}, removing {APPLICATION_KEY}: {e}");
        // delete_entry logs its own failure.
        let _ = delete_entry(key, APPLICATION_KEY);
        return Err(e.into());
    }
    Ok(())
}

/// Stores the application key and secret in the system keyring.
///
/// If the secret cannot be written, the key entry is removed again.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn store_credentials(credentials: &Credentials) -> CredentialResult<()> {
    store_pair(&entry(APPLICATION_KEY)?, &entry(APPLICATION_SECRET)?, credentials)?;
    debug!("Stored application credentials in keyring");
    Ok(())
}

/// Loads the application key and secret from the system keyring.
///
/// Returns `None` unless both entries exist.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn load_credentials() -> CredentialResult<Option<Credentials>> {
    let Some(key) = get(APPLICATION_KEY)? else {
        return Ok(None);
    };
    let Some(secret) = get(APPLICATION_SECRET)? else {
        return Ok(None);
    };
    Ok(Some(Credentials::new(key, secret)))
}

/// Deletes both credential entries from the keyring.
///
/// # Errors
///
/// Returns an error if the keyring operation fails (except for missing entries).
pub fn delete_credentials() -> CredentialResult<()> {
    delete(APPLICATION_KEY)?;
    delete(APPLICATION_SECRET)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use keyring::mock::MockCredential;

    fn mock_entry(credential_type: &str) -> Entry {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        entry(credential_type).unwrap()
    }

    fn mock(entry: &Entry) -> &MockCredential {
        entry.get_credential().downcast_ref().unwrap()
    }

    #[test]
    fn test_store_pair() {
        let key = mock_entry(APPLICATION_KEY);
        let secret = mock_entry(APPLICATION_SECRET);

        store_pair(&key, &secret, &Credentials::new("key", "secret")).unwrap();
        assert_eq!(key.get_password().unwrap(), "key");
        assert_eq!(secret.get_password().unwrap(), "secret");
    }

    #[test]
    fn test_store_pair_removes_key_when_secret_fails() {
        let key = mock_entry(APPLICATION_KEY);
        let secret = mock_entry(APPLICATION_SECRET);
        mock(&secret).set_error(keyring::Error::Invalid(
            "collection".to_string(),
            "locked".to_string(),
        ));

        let result = store_pair(&key, &secret, &Credentials::new("key", "secret"));
        assert!(matches!(
            result,
            Err(CredentialError::Keyring(keyring::Error::Invalid(..)))
        ));
        assert!(matches!(key.get_password(), Err(keyring::Error::NoEntry)));
    }

    #[test]
    fn test_delete_missing_entry() {
        let key = mock_entry(APPLICATION_KEY);
        delete_entry(&key, APPLICATION_KEY).unwrap();

        key.set_password("key").unwrap();
        delete_entry(&key, APPLICATION_KEY).unwrap();
        assert!(matches!(key.get_password(), Err(keyring::Error::NoEntry)));
    }

    #[test]
    fn test_credential_key() {
        assert_eq!(credential_key(APPLICATION_KEY), "automower_application_key");
        assert_eq!(
            credential_key(APPLICATION_SECRET),
            "automower_application_secret"
        );
    }
}
