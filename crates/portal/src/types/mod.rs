//! Validated value types.

mod api_url;
mod endpoint;

pub use api_url::ApiUrl;
pub use endpoint::Endpoint;
