//! Credential persistence.
//!
//! The client never caches the bearer credential itself. Every request asks
//! the [`CredentialStore`] for the current value, so a login or logout made
//! through any client sharing the store is visible to the next request.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::auth::AccessToken;
use crate::error::StoreError;

/// Key under which the credential is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Holds at most one bearer credential.
///
/// Writing replaces any previous value and clearing removes it. An empty
/// stored value reads back as `None`.
pub trait CredentialStore: Send + Sync {
    /// Read the current credential.
    fn get(&self) -> Result<Option<AccessToken>, StoreError>;

    /// Replace the stored credential.
    fn set(&self, token: &AccessToken) -> Result<(), StoreError>;

    /// Remove the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}
