//! The authenticated API client.
//!
//! [`ApiClient`] is the only gateway to the backend. It reads the bearer
//! credential from its [`CredentialStore`] on every call, decides per endpoint
//! whether to attach it, and folds every failure into [`Error`].

mod endpoints;
mod options;

pub use options::RequestOptions;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use crate::Result;
use crate::auth::{AccessToken, Credentials};
use crate::config::ClientConfig;
use crate::error::{ApiError, DecodeError, Error, InvalidInputError};
use crate::models::{AuthResponse, MessageResponse, User};
use crate::store::CredentialStore;
use crate::types::Endpoint;

use endpoints::*;

/// Client for the portal HTTP API.
///
/// Cheap to clone; clones share the HTTP connection pool and the credential
/// store. Separate clients built over the same `Arc<dyn CredentialStore>` see
/// each other's logins and logouts on their next request.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use portal::{ApiClient, ClientConfig, Credentials, MemoryStore};
///
/// # async fn example() -> Result<(), portal::Error> {
/// let client = ApiClient::new(ClientConfig::from_env()?, Arc::new(MemoryStore::new()))?;
/// let auth = client.login(&Credentials::new("a@b.com", "pw123456")).await?;
/// println!("Logged in as {}", auth.user.email);
///
/// let me = client.current_user().await?;
/// assert_eq!(me.email, auth.user.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a client for `config`, persisting credentials into `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                store,
            }),
        })
    }

    /// Create a client whose base URL comes from the environment.
    pub fn from_env(store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::new(ClientConfig::from_env()?, store)
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    // ========================================================================
    // Core Request
    // ========================================================================

    /// Send a request to `endpoint` (a path appended to the base URL) and
    /// decode the JSON response as `R`.
    ///
    /// The endpoint is normalized once (see [`Endpoint`]), and both the
    /// credential decision and the request URL use that normalized form. The
    /// credential is read from the store on every call and attached as
    /// `Authorization: Bearer <token>` unless the endpoint is exempt under the
    /// configured [`ExemptionPolicy`](crate::ExemptionPolicy). This method
    /// never writes to the store.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] when the endpoint contains dot segments
    /// - [`Error::Api`] for any non-success status
    /// - [`Error::Decode`] when a success body does not decode as `R`
    /// - [`Error::Transport`] when the request never completed
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let endpoint = Endpoint::parse(endpoint)?;
        self.send(&endpoint, options).await
    }

    #[instrument(skip(self, options), fields(endpoint = %endpoint, method = %options.method()))]
    async fn send<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<R> {
        let token = self.inner.store.get()?;
        let (method, body, extra_headers) = options.into_parts();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in extra_headers {
            let (name, value) = parse_header(&name, &value)?;
            headers.insert(name, value);
        }
        headers.remove(AUTHORIZATION);

        let exempt = self.inner.config.exemption.is_exempt(endpoint);
        match token {
            Some(token) if !exempt => {
                headers.insert(AUTHORIZATION, bearer_header(&token)?);
                trace!("Attaching bearer credential");
            }
            Some(_) => trace!("Endpoint exempt, withholding credential"),
            None => trace!("No stored credential"),
        }

        let url = self.inner.config.base_url.endpoint_url(endpoint);
        debug!(%url, "API request");

        let mut builder = self.inner.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        trace!(status = %status, "API response");

        if !status.is_success() {
            let error = parse_error_response(response).await;
            debug!(status = %error.status(), error = error.message(), "API error");
            return Err(Error::Api(error));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            Error::Decode(DecodeError {
                endpoint: endpoint.path().to_string(),
                source,
            })
        })
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Create an account and store the returned credential.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse> {
        info!("Registering account");
        let body = PasswordAuthRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response: AuthResponse = self
            .request(REGISTER, RequestOptions::post(&body)?)
            .await?;
        self.persist(&response)?;
        Ok(response)
    }

    /// Log in with email and password and store the returned credential.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        info!("Logging in");
        let body = PasswordAuthRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response: AuthResponse = self
            .request(LOGIN, RequestOptions::post(&body)?)
            .await?;
        self.persist(&response)?;
        Ok(response)
    }

    /// Ask the server to email a one-time login link. Does not touch the store.
    #[instrument(skip(self))]
    pub async fn request_magic_link(&self, email: &str) -> Result<MessageResponse> {
        self.request(
            MAGIC_LINK_REQUEST,
            RequestOptions::post(&EmailRequest { email })?,
        )
        .await
    }

    /// Exchange a magic-link token for a credential and store it.
    #[instrument(skip(self, token))]
    pub async fn verify_magic_link(&self, token: &str) -> Result<AuthResponse> {
        info!("Verifying magic link");
        let response: AuthResponse = self
            .request(
                MAGIC_LINK_VERIFY,
                RequestOptions::post(&TokenRequest { token })?,
            )
            .await?;
        self.persist(&response)?;
        Ok(response)
    }

    /// Fetch the account the stored credential belongs to.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.request(CURRENT_USER, RequestOptions::get()).await
    }

    /// Ask the server to email a password-reset token.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse> {
        self.request(
            PASSWORD_RESET_REQUEST,
            RequestOptions::post(&EmailRequest { email })?,
        )
        .await
    }

    /// Set a new password using a reset token.
    #[instrument(skip(self, token, new_password))]
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse> {
        self.request(
            PASSWORD_RESET_CONFIRM,
            RequestOptions::post(&PasswordResetConfirmRequest {
                token,
                new_password,
            })?,
        )
        .await
    }

    /// Permanently delete the current account.
    ///
    /// The stored credential is left in place; call [`logout`](Self::logout)
    /// afterwards.
    #[instrument(skip(self, password))]
    pub async fn delete_account(&self, password: &str) -> Result<MessageResponse> {
        info!("Deleting account");
        self.request(
            DELETE_ACCOUNT,
            RequestOptions::post(&DeleteAccountRequest { password })?,
        )
        .await
    }

    /// Forget the stored credential. No network call is made.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.inner.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// True when the store currently holds a credential.
    ///
    /// A store that cannot be read counts as anonymous.
    pub fn is_authenticated(&self) -> bool {
        match self.inner.store.get() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read credential store");
                false
            }
        }
    }

    fn persist(&self, response: &AuthResponse) -> Result<()> {
        self.inner.store.set(&response.access_token)?;
        debug!(user_id = response.user.id, "Stored credential");
        Ok(())
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// List files.
    #[instrument(skip(self))]
    pub async fn files<R: DeserializeOwned>(&self) -> Result<R> {
        self.request(FILES, RequestOptions::get()).await
    }

    /// Fetch one file. `id` is sent as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] without sending anything if `id` is
    /// empty, `.` or `..`.
    #[instrument(skip(self))]
    pub async fn file<R: DeserializeOwned>(&self, id: &str) -> Result<R> {
        let endpoint = Endpoint::resource(FILES, id)?;
        self.send(&endpoint, RequestOptions::get()).await
    }

    /// Create a file from `data`.
    #[instrument(skip(self, data))]
    pub async fn create_file<B, R>(&self, data: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(FILES, RequestOptions::post(data)?).await
    }

    /// Fetch one receipt. `id` is handled as in [`file`](Self::file).
    #[instrument(skip(self))]
    pub async fn receipt<R: DeserializeOwned>(&self, id: &str) -> Result<R> {
        let endpoint = Endpoint::resource(RECEIPTS, id)?;
        self.send(&endpoint, RequestOptions::get()).await
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = |reason: String| {
        Error::InvalidInput(InvalidInputError::Header {
            name: name.to_string(),
            reason,
        })
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok((header_name, header_value))
}

fn bearer_header(token: &AccessToken) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&token.bearer()).map_err(|e| {
        Error::InvalidInput(InvalidInputError::Header {
            name: AUTHORIZATION.as_str().to_string(),
            reason: e.to_string(),
        })
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Build an [`ApiError`] from a failed response. Unreadable or non-JSON bodies
/// fall back to the status line.
async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let message = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message),
        Err(_) => None,
    };
    ApiError::new(status, message)
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("exemption", &self.inner.config.exemption)
            .field("store", &"[REDACTED]")
            .finish()
    }
}
