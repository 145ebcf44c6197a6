//! portal - Authenticated API client
//!
//! This library is the single gateway between an application and the portal
//! HTTP API. All calls flow through an [`ApiClient`], which owns credential
//! persistence, request construction, and error normalization.
//!
//! The bearer credential lives in a [`CredentialStore`] and is re-read on
//! every request. "Authenticated" means exactly "the store holds a
//! credential"; the client never changes that state on its own when a
//! request is rejected.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use portal::{ApiClient, ClientConfig, Credentials, FileStore};
//!
//! # async fn example() -> Result<(), portal::Error> {
//! let store = Arc::new(FileStore::new("/tmp/portal/credentials.json"));
//! let client = ApiClient::new(ClientConfig::from_env()?, store)?;
//!
//! if !client.is_authenticated() {
//!     client.login(&Credentials::new("a@b.com", "pw123456")).await?;
//! }
//!
//! match client.current_user().await {
//!     Ok(user) => println!("{}", user.email),
//!     Err(e) if e.is_unauthorized() => client.logout()?,
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Credentials};
pub use client::{ApiClient, RequestOptions};
pub use config::{ClientConfig, ExemptionPolicy};
pub use error::{ApiError, Error};
pub use models::{AuthResponse, MessageResponse, User};
pub use store::{CredentialStore, FileStore, MemoryStore};
pub use types::{ApiUrl, Endpoint};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
