//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::Endpoint;

/// A validated API base URL.
///
/// The URL must be absolute and use HTTPS (or HTTP for loopback hosts).
/// Endpoint paths are appended to the base path, so `/api` style prefixes
/// survive.
///
/// # Example
///
/// ```
/// use portal::ApiUrl;
/// use portal::types::Endpoint;
///
/// let api = ApiUrl::new("http://localhost:8000/api").unwrap();
/// let me = Endpoint::parse("/auth/me").unwrap();
/// assert_eq!(api.endpoint_url(&me), "http://localhost:8000/api/auth/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(Self(url))
    }

    /// Returns the full URL for `endpoint`.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self, endpoint)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://api.example.com/api").unwrap();
        assert_eq!(api.host(), Some("api.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(api.host(), Some("localhost"));
    }

    fn endpoint(raw: &str) -> Endpoint {
        Endpoint::parse(raw).unwrap()
    }

    #[test]
    fn endpoint_url_keeps_path_prefix() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            api.endpoint_url(&endpoint("/auth/login")),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn endpoint_url_normalizes_trailing_slash() {
        let api = ApiUrl::new("https://api.example.com/api/").unwrap();
        assert_eq!(
            api.endpoint_url(&endpoint("/files/7")),
            "https://api.example.com/api/files/7"
        );
        assert_eq!(api.to_string(), "https://api.example.com/api");
    }

    #[test]
    fn endpoint_url_matches_with_or_without_leading_slash() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            api.endpoint_url(&endpoint("auth/login")),
            api.endpoint_url(&endpoint("/auth/login"))
        );
        assert_eq!(
            api.endpoint_url(&endpoint("files?page=2")),
            "http://localhost:8000/api/files?page=2"
        );
    }

    #[test]
    fn endpoint_url_on_bare_host() {
        let api = ApiUrl::new("https://api.example.com").unwrap();
        assert_eq!(
            api.endpoint_url(&endpoint("/auth/me")),
            "https://api.example.com/auth/me"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://api.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(ApiUrl::new("https://api.example.com/api?x=1").is_err());
    }
}
