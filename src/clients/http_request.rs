//! Request descriptors for the storefront API gateway.
//!
//! An [`HttpRequest`] names the verb, the path relative to the base endpoint,
//! the ordered query parameters, an optional JSON body and whether the call
//! must carry the session's bearer token.

use std::fmt;

use crate::clients::errors::InvalidRequestError;

/// HTTP methods used by the storefront backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace or update a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case verb.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to be dispatched through the [`HttpClient`](crate::clients::HttpClient).
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use storefront_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let list = HttpRequest::builder(HttpMethod::Get, "/products")
///     .query_param("page", "2")
///     .build()
///     .unwrap();
/// assert_eq!(list.query_string(), "page=2");
///
/// let create = HttpRequest::builder(HttpMethod::Post, "/admin/categories")
///     .body(json!({"name": "Pumps"}))
///     .requires_auth(true)
///     .build()
///     .unwrap();
/// assert!(create.requires_auth);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base endpoint, starting with `/`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body, never present on GET.
    pub body: Option<serde_json::Value>,
    /// Whether the bearer token must be attached.
    pub requires_auth: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if:
    /// - the path does not start with `/`
    /// - the path still contains a `{placeholder}`
    /// - a GET request carries a body
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidRequestError::RelativePath {
                path: self.path.clone(),
            });
        }

        if self.path.contains(['{', '}']) {
            return Err(InvalidRequestError::UnresolvedPlaceholder {
                path: self.path.clone(),
            });
        }

        if self.method == HttpMethod::Get && self.body.is_some() {
            return Err(InvalidRequestError::BodyOnGet {
                path: self.path.clone(),
            });
        }

        Ok(())
    }

    /// Serializes the query parameters, percent-encoding keys and values.
    ///
    /// Returns an empty string when there are no parameters.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    requires_auth: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: false,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters, keeping their order.
    #[must_use]
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Marks the request as requiring the session's bearer token.
    #[must_use]
    pub const fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the descriptor fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidRequestError> {
        let request = HttpRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            requires_auth: self.requires_auth,
        };
        request.verify()?;
        Ok(request)
    }
}
