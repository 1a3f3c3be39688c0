// Credential store seam
//
// Single source of truth for "is the user authenticated, with what
// permissions". The request channel reads the token from here; auth
// operations and the unauthorized handler are the only writers.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

use secrecy::SecretString;
use thiserror::Error;

/// The token plus permission set identifying the current session.
#[derive(Debug, Clone, Default)]
pub struct Credential {
    pub token: Option<SecretString>,
    pub permissions: BTreeSet<String>,
}

impl Credential {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Failure while persisting credential material.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key-value holder of the current credential.
///
/// Reads never fail: absent or malformed data reads as "no token" and an
/// empty permission set. Writes report storage failures.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<SecretString>;

    fn set_token(&self, token: &SecretString) -> Result<(), CredentialError>;

    fn clear_token(&self) -> Result<(), CredentialError>;

    fn permissions(&self) -> BTreeSet<String>;

    fn set_permissions(&self, permissions: &BTreeSet<String>) -> Result<(), CredentialError>;

    /// Snapshot of token and permissions.
    fn get(&self) -> Credential {
        Credential {
            token: self.token(),
            permissions: self.permissions(),
        }
    }

    /// Destroy the whole credential (token and permissions).
    fn clear(&self) -> Result<(), CredentialError> {
        self.clear_token()?;
        self.set_permissions(&BTreeSet::new())
    }
}

/// In-process credential store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: RwLock::new(credential),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<SecretString> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    fn set_token(&self, token: &SecretString) -> Result<(), CredentialError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .token = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), CredentialError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .token = None;
        Ok(())
    }

    fn permissions(&self) -> BTreeSet<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .permissions
            .clone()
    }

    fn set_permissions(&self, permissions: &BTreeSet<String>) -> Result<(), CredentialError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .permissions = permissions.clone();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn empty_store_is_unauthenticated() {
        let store = MemoryCredentialStore::new();
        let cred = store.get();
        assert!(!cred.is_authenticated());
        assert!(cred.permissions.is_empty());
    }

    #[test]
    fn set_and_clear_token() {
        let store = MemoryCredentialStore::new();
        store.set_token(&SecretString::from("abc".to_owned())).unwrap();
        assert_eq!(store.token().unwrap().expose_secret(), "abc");

        store.clear_token().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn clear_drops_permissions_too() {
        let store = MemoryCredentialStore::new();
        store.set_token(&SecretString::from("abc".to_owned())).unwrap();
        store
            .set_permissions(&BTreeSet::from(["orders.manage".to_owned()]))
            .unwrap();

        store.clear().unwrap();
        let cred = store.get();
        assert!(cred.token.is_none());
        assert!(cred.permissions.is_empty());
    }
}
