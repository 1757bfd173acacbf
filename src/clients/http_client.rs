//! The request gateway.
//!
//! [`HttpClient::dispatch`] is the single path every resource operation takes
//! to the backend. It enforces the auth requirement of the descriptor,
//! attaches the bearer token, and folds every possible result into an
//! [`Outcome`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::clients::errors::{ApiError, Outcome};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, MALFORMED_BODY};
use crate::config::{ApiConfig, BaseUrl};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the storefront backend.
///
/// The client handles:
/// - URL construction from the configured base endpoint
/// - Default headers including `User-Agent` and `Content-Type`
/// - Bearer token attachment for requests that require auth
/// - Status code classification into [`ErrorKind`](crate::clients::ErrorKind)
/// - Clearing the session when the token it sent is rejected with 401
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use storefront_api::{ApiConfig, SessionStore};
/// use storefront_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let store = Arc::new(SessionStore::new());
/// let client = HttpClient::new(&ApiConfig::from_env()?, store)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/categories").build()?;
/// let response = client.dispatch(request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
    store: Arc<SessionStore>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new gateway bound to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &ApiConfig, store: Arc<SessionStore>) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Storefront API Client v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            store,
        })
    }

    /// Returns the base endpoint for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session store this client reads credentials from.
    #[must_use]
    pub const fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Returns the absolute URL a request would be sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let url = self.base_url.join(&request.path);
        let query = request.query_string();
        if query.is_empty() {
            url
        } else {
            format!("{url}?{query}")
        }
    }

    /// Sends a request to the storefront backend.
    ///
    /// No network call is made when the descriptor is malformed, or when it
    /// requires auth and there is no usable token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with kind:
    /// - `InvalidRequest` if the descriptor fails validation
    /// - `Unauthorized` if auth is required and there is no session, the
    ///   token has expired, or the backend answers 401
    /// - `Network` if no response was received
    /// - `NotFound`, `Validation` or `HttpStatus` for other non-2xx responses
    /// - `Unknown` if a 2xx body is not valid JSON
    pub async fn dispatch(&self, request: HttpRequest) -> Outcome<HttpResponse> {
        request.verify()?;

        let token = if request.requires_auth {
            let Some(token) = self.store.token() else {
                tracing::debug!(
                    "Refusing {} {} without an active session",
                    request.method,
                    request.path
                );
                return Err(ApiError::unauthorized("no active session"));
            };

            if token.is_expired() {
                tracing::warn!("Session token expired, clearing session");
                self.store.clear_if_current(&token);
                return Err(ApiError::unauthorized("session expired"));
            }

            Some(token)
        } else {
            None
        };

        let url = self.url_for(&request);
        tracing::debug!("Dispatching {} {}", request.method, request.path);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(token) = &token {
            req_builder = req_builder.header("Authorization", token.bearer_header());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await.map_err(|e| {
            tracing::debug!("{} {} failed in transport: {}", request.method, request.path, e);
            ApiError::from(e)
        })?;

        let code = res.status().as_u16();
        let body_text = res.text().await?;

        tracing::debug!(
            status = code,
            "Received response for {} {}",
            request.method,
            request.path
        );

        if !(200..=299).contains(&code) {
            let error = ApiError::from_response(code, &body_text);

            // Only the session whose token was sent is stale
            if let (401, Some(sent)) = (code, &token) {
                if self.store.clear_if_current(sent) {
                    tracing::warn!(
                        "Authenticated request to {} was rejected, clearing session",
                        request.path
                    );
                } else {
                    tracing::debug!(
                        "Rejected token for {} was already replaced, keeping session",
                        request.path
                    );
                }
            }

            return Err(error);
        }

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).map_err(|e| {
                tracing::debug!("Response to {} is not JSON: {}", request.path, e);
                ApiError::malformed(MALFORMED_BODY)
            })?
        };

        Ok(HttpResponse::new(code, body))
    }
}
