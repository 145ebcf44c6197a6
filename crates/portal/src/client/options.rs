//! Per-request options for [`ApiClient::request`](super::ApiClient::request).

use reqwest::Method;
use serde::Serialize;

use crate::Result;
use crate::error::{Error, InvalidInputError};

/// Method, body, and extra headers for one request.
///
/// Caller headers are applied on top of the default
/// `Content-Type: application/json`. The `Authorization` header is always
/// decided by the client and cannot be set here.
///
/// # Example
///
/// ```
/// use portal::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::post(&json!({"name": "notes.txt"}))
///     .unwrap()
///     .header("X-Request-Id", "42");
/// assert_eq!(options.method().as_str(), "POST");
/// ```
#[derive(Clone, Default)]
pub struct RequestOptions {
    method: Method,
    body: Option<Vec<u8>>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// A `GET` without a body.
    pub fn get() -> Self {
        Self::default()
    }

    /// A `POST` carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Self::with_body(Method::POST, body)
    }

    /// Any method carrying `body` as JSON.
    pub fn with_body<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Body {
                reason: e.to_string(),
            })
        })?;
        Ok(Self {
            method,
            body: Some(body),
            headers: Vec::new(),
        })
    }

    /// Override the method.
    pub fn method_override(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header. Later values for the same name win.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) fn into_parts(self) -> (Method, Option<Vec<u8>>, Vec<(String, String)>) {
        (self.method, self.body, self.headers)
    }
}

// Bodies may carry passwords.
impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("body", &self.body.as_ref().map(|_| "[REDACTED]"))
            .field("headers", &self.headers.len())
            .finish()
    }
}
