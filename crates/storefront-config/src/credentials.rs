// ── Durable credential store ──
//
// A small JSON key-value file holding the session under two fixed keys:
// `token` and `permissions`. Permissions are stored as an encoded JSON
// array string, so a damaged value degrades to "no permissions" instead
// of poisoning the whole file. Writes replace the file atomically and keep
// it readable by the owner only.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use storefront_api::{CredentialError, CredentialStore};

const TOKEN_KEY: &str = "token";
const PERMISSIONS_KEY: &str = "permissions";

type Entries = BTreeMap<String, String>;

/// File-backed [`CredentialStore`]. Survives process restarts.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absent, unreadable or malformed files read as empty.
    fn read_entries(&self) -> Entries {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file unreadable");
                return Entries::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "credential file malformed; ignoring");
            Entries::new()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), CredentialError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<(), CredentialError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<SecretString> {
        self.read_entries()
            .remove(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    fn set_token(&self, token: &SecretString) -> Result<(), CredentialError> {
        debug!(path = %self.path.display(), "storing token");
        self.update(|e| {
            e.insert(TOKEN_KEY.into(), token.expose_secret().to_owned());
        })
    }

    fn clear_token(&self) -> Result<(), CredentialError> {
        self.update(|e| {
            e.remove(TOKEN_KEY);
        })
    }

    fn permissions(&self) -> BTreeSet<String> {
        let Some(encoded) = self.read_entries().remove(PERMISSIONS_KEY) else {
            return BTreeSet::new();
        };
        serde_json::from_str::<Vec<String>>(&encoded)
            .map(|list| list.into_iter().collect())
            .unwrap_or_else(|e| {
                warn!(error = %e, "stored permissions malformed; treating as empty");
                BTreeSet::new()
            })
    }

    fn set_permissions(&self, permissions: &BTreeSet<String>) -> Result<(), CredentialError> {
        if permissions.is_empty() {
            return self.update(|e| {
                e.remove(PERMISSIONS_KEY);
            });
        }
        let encoded = serde_json::to_string(permissions)?;
        self.update(|e| {
            e.insert(PERMISSIONS_KEY.into(), encoded);
        })
    }
}
