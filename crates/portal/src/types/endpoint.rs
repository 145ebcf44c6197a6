//! Normalized endpoint paths.

use std::fmt;
use url::Url;

use crate::error::InvalidInputError;

/// An endpoint path relative to the API base URL.
///
/// The credential decision and the request URL are both derived from this
/// one value. Parsing adds the leading `/`, collapses repeated and trailing
/// slashes and drops any fragment. The query string is kept for the request
/// URL but is not part of [`path`](Self::path).
///
/// Dot segments (including their percent-encoded forms) and backslashes are
/// rejected. URL resolution would otherwise send the request to a different
/// route than the one the credential decision was made for.
///
/// # Example
///
/// ```
/// use portal::types::Endpoint;
///
/// let endpoint = Endpoint::parse("auth/login/?next=files").unwrap();
/// assert_eq!(endpoint.path(), "/auth/login");
/// assert_eq!(endpoint.to_string(), "/auth/login?next=files");
///
/// let file = Endpoint::resource("/files", "a/b").unwrap();
/// assert_eq!(file.path(), "/files/a%2Fb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    path: String,
    query: Option<String>,
}

impl Endpoint {
    /// Parse an endpoint whose segments are already URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment is `.` or `..` or contains a backslash.
    pub fn parse(raw: &str) -> Result<Self, InvalidInputError> {
        let without_fragment = raw.split('#').next().unwrap_or(raw);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        let mut normalized = String::with_capacity(path.len() + 1);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment.contains('\\') {
                return Err(invalid_endpoint(raw, "backslashes are not allowed"));
            }
            if is_dot_segment(segment) {
                return Err(invalid_endpoint(raw, "dot segments are not allowed"));
            }
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }

        Ok(Self {
            path: normalized,
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    /// The endpoint for one item of `collection`, with `id` encoded as a
    /// single path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is empty, `.` or `..`.
    pub fn resource(collection: &str, id: &str) -> Result<Self, InvalidInputError> {
        if id.is_empty() {
            return Err(invalid_id(id, "must not be empty"));
        }
        if id == "." || id == ".." {
            return Err(invalid_id(id, "must not be a dot segment"));
        }

        let mut scratch =
            Url::parse("http://segment.invalid/").map_err(|e| invalid_id(id, &e.to_string()))?;
        scratch
            .path_segments_mut()
            .map_err(|()| invalid_id(id, "cannot be encoded"))?
            .clear()
            .push(id);
        let encoded = scratch.path().trim_start_matches('/');

        Self::parse(&format!("{}/{}", collection, encoded))
    }

    /// The normalized path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query string without the leading `?`, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

/// `.` and `..`, also when spelled with `%2e`.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn invalid_endpoint(value: &str, reason: &str) -> InvalidInputError {
    InvalidInputError::Endpoint {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn invalid_id(value: &str, reason: &str) -> InvalidInputError {
    InvalidInputError::ResourceId {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
