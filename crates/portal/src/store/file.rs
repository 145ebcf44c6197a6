//! File-backed credential store.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::auth::AccessToken;
use crate::error::StoreError;

use super::CredentialStore;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk layout: a JSON object with a single [`ACCESS_TOKEN_KEY`](super::ACCESS_TOKEN_KEY) key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(default)]
    access_token: Option<String>,
}

/// Persists the credential as a small JSON file.
///
/// Writes go through a temporary file and a rename, guarded by an exclusive
/// lock on a sibling `.lock` file, so concurrent processes never observe a
/// half-written credential. On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file and its parent
    /// directory are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn open_lock(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        Ok(lock_file)
    }

    fn write_locked(&self, stored: &StoredCredential) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stored)?;
        let tmp = self.tmp_path();

        let mut file = File::create(&tmp)?;
        #[cfg(unix)]
        {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms)?;
        }
        file.write_all(json.as_bytes())?;
        file.sync_data()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Result<Option<AccessToken>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredCredential = serde_json::from_str(&json)?;
        Ok(stored
            .access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken::new))
    }

    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    fn set(&self, token: &AccessToken) -> Result<(), StoreError> {
        let lock_file = self.open_lock()?;
        lock_file.lock_exclusive()?;

        let result = self.write_locked(&StoredCredential {
            access_token: Some(token.as_str().to_string()),
        });

        lock_file.unlock()?;
        result?;

        debug!("Stored credential");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StoreError> {
        let lock_file = self.open_lock()?;
        lock_file.lock_exclusive()?;

        let result = match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };

        lock_file.unlock()?;
        result?;

        debug!("Cleared credential");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ACCESS_TOKEN_KEY;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("portal").join("credentials.json"))
    }

    #[test]
    fn missing_file_is_anonymous() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).get().unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips_across_instances() {
        let dir = TempDir::new().unwrap();
        store(&dir).set(&AccessToken::new("T1")).unwrap();

        let token = store(&dir).get().unwrap().unwrap();
        assert_eq!(token.as_str(), "T1");

        let raw = fs::read_to_string(store(&dir).path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[ACCESS_TOKEN_KEY], "T1");
    }

    #[test]
    fn set_replaces_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set(&AccessToken::new("T1")).unwrap();
        store.set(&AccessToken::new("T2")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().as_str(), "T2");
    }

    #[test]
    fn clear_removes_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set(&AccessToken::new("T1")).unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.get(), Err(StoreError::Corrupt(_))));
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set(&AccessToken::new("T1")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
