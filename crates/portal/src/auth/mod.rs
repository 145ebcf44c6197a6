//! Authentication primitives.
//!
//! [`Credentials`] carry an email and password into the auth endpoints;
//! [`AccessToken`] is the bearer credential they hand back.

mod credentials;
mod tokens;

pub use credentials::Credentials;
pub use tokens::AccessToken;
