//! In-process credential store.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::auth::AccessToken;
use crate::error::StoreError;

use super::CredentialStore;

/// A credential store that lives only as long as the process.
///
/// Share one instance between clients with `Arc` to have them observe each
/// other's logins and logouts.
#[derive(Default)]
pub struct MemoryStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(AccessToken::new(token))),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Result<Option<AccessToken>, StoreError> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        Ok(token.as_ref().filter(|t| !t.as_str().is_empty()).cloned())
    }

    fn set(&self, token: &AccessToken) -> Result<(), StoreError> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self
            .token
            .read()
            .map(|t| t.is_some())
            .unwrap_or_default();
        f.debug_struct("MemoryStore")
            .field("present", &present)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn set_replaces_and_clear_removes() {
        let store = MemoryStore::with_token("T1");
        store.set(&AccessToken::new("T2")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().as_str(), "T2");

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let store = MemoryStore::with_token("");
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let store = MemoryStore::with_token("secret-token");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("present: true"));
    }
}
