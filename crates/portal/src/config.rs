//! Client configuration.

use tracing::debug;

use crate::Result;
use crate::types::{ApiUrl, Endpoint};

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "PUBLIC_API_URL";

/// Base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// How the client decides that an endpoint must never carry a credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExemptionPolicy {
    /// Only the exact routes in [`EXACT_EXEMPT_ROUTES`] are exempt.
    #[default]
    Exact,
    /// Any endpoint containing one of [`SUBSTRING_EXEMPT_ROUTES`] is exempt.
    /// Matches the behaviour older deployments relied on.
    Substring,
}

/// Routes that never carry a credential under [`ExemptionPolicy::Exact`].
pub const EXACT_EXEMPT_ROUTES: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/auth/magic-link/request",
    "/auth/magic-link/verify",
];

/// Fragments that exempt an endpoint under [`ExemptionPolicy::Substring`].
pub const SUBSTRING_EXEMPT_ROUTES: &[&str] = &["/auth/login", "/auth/register", "/auth/magic-link"];

impl ExemptionPolicy {
    /// True when `endpoint` must be sent without a credential.
    ///
    /// Exact matching looks at the normalized path only, so the query string
    /// never affects it.
    pub fn is_exempt(self, endpoint: &Endpoint) -> bool {
        match self {
            ExemptionPolicy::Exact => EXACT_EXEMPT_ROUTES.contains(&endpoint.path()),
            ExemptionPolicy::Substring => {
                let full = endpoint.to_string();
                SUBSTRING_EXEMPT_ROUTES
                    .iter()
                    .any(|route| full.contains(route))
            }
        }
    }
}

/// Everything an [`ApiClient`](crate::ApiClient) needs besides its store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: ApiUrl,
    pub exemption: ExemptionPolicy,
}

impl ClientConfig {
    /// Configuration for the given base URL with default settings.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            exemption: ExemptionPolicy::default(),
        }
    }

    /// Resolve the base URL from [`API_URL_ENV`], falling back to
    /// [`DEFAULT_API_URL`] when unset or blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a valid API URL.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(API_URL_ENV).ok();
        Self::from_optional(value.as_deref())
    }

    /// Resolve from an optional value, applying the default fallback.
    pub fn from_optional(value: Option<&str>) -> Result<Self> {
        let raw = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        debug!(api_url = raw, "Resolved API base URL");
        Ok(Self::new(ApiUrl::new(raw)?))
    }

    /// Use a different exemption policy.
    pub fn with_exemption(mut self, exemption: ExemptionPolicy) -> Self {
        self.exemption = exemption;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_url() {
        let config = ClientConfig::from_optional(None).unwrap();
        assert_eq!(config.base_url.to_string(), DEFAULT_API_URL);
        assert_eq!(config.exemption, ExemptionPolicy::Exact);

        let config = ClientConfig::from_optional(Some("  ")).unwrap();
        assert_eq!(config.base_url.to_string(), DEFAULT_API_URL);
    }

    #[test]
    fn uses_provided_url() {
        let config = ClientConfig::from_optional(Some("https://api.example.com/api")).unwrap();
        assert_eq!(config.base_url.host(), Some("api.example.com"));
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(ClientConfig::from_optional(Some("not a url")).is_err());
    }

    fn exempt(policy: ExemptionPolicy, raw: &str) -> bool {
        policy.is_exempt(&Endpoint::parse(raw).unwrap())
    }

    #[test]
    fn exact_policy_matches_whole_routes_only() {
        let policy = ExemptionPolicy::Exact;
        assert!(exempt(policy, "/auth/login"));
        assert!(exempt(policy, "/auth/register/"));
        assert!(exempt(policy, "/auth/magic-link/verify"));
        assert!(exempt(policy, "/auth/magic-link/request?next=/files"));
        assert!(!exempt(policy, "/auth/login-extra"));
        assert!(!exempt(policy, "/auth/me"));
        assert!(!exempt(policy, "/files/auth/login"));
        assert!(!exempt(policy, "/auth/password-reset/request"));
    }

    #[test]
    fn exact_policy_ignores_slash_spelling() {
        let policy = ExemptionPolicy::Exact;
        assert!(exempt(policy, "auth/login"));
        assert!(exempt(policy, "auth//register"));
        assert!(exempt(policy, "//auth/magic-link/verify/#done"));
        assert!(!exempt(policy, "auth/me"));
    }

    #[test]
    fn substring_policy_matches_containment() {
        let policy = ExemptionPolicy::Substring;
        assert!(exempt(policy, "/auth/login"));
        assert!(exempt(policy, "auth/login"));
        assert!(exempt(policy, "/auth/login-extra"));
        assert!(exempt(policy, "/auth/magic-link/request"));
        assert!(exempt(policy, "/files/auth/register"));
        assert!(!exempt(policy, "/auth/me"));
        assert!(!exempt(policy, "/auth/account/delete"));
    }
}
