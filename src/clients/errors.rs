//! Failure types produced by the request gateway.
//!
//! Every dispatch ends in an [`Outcome`]: either the success payload or an
//! [`ApiError`] whose [`ErrorKind`] tells the caller how to react.
//!
//! | Kind | Cause | Caller reaction |
//! |---|---|---|
//! | [`ErrorKind::Network`] | no response (DNS, refused, timeout) | may retry |
//! | [`ErrorKind::Unauthorized`] | missing, invalid or expired credential | re-authenticate |
//! | [`ErrorKind::Validation`] | 400 / 422 | show message inline |
//! | [`ErrorKind::NotFound`] | 404 | resource absent |
//! | [`ErrorKind::HttpStatus`] | any other non-2xx | generic failure |
//! | [`ErrorKind::Unknown`] | malformed response body | generic failure |
//! | [`ErrorKind::InvalidRequest`] | malformed request descriptor | programmer error |
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::{ErrorKind, StorefrontClient};
//!
//! match client.products().get(42).await {
//!     Ok(product) => println!("{}", product.name),
//!     Err(e) if e.kind == ErrorKind::NotFound => println!("gone"),
//!     Err(e) if e.is_unauthorized() => { /* route to login */ }
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Result of every gateway dispatch and resource operation.
pub type Outcome<T> = Result<T, ApiError>;

/// Classification of a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response was received.
    Network,
    /// Non-2xx status without a more specific classification.
    HttpStatus(u16),
    /// Missing, invalid or expired credential.
    Unauthorized,
    /// The backend rejected the payload (400 or 422).
    Validation,
    /// The referenced resource does not exist.
    NotFound,
    /// The response could not be understood.
    Unknown,
    /// The request descriptor itself was malformed; nothing was sent.
    InvalidRequest,
}

impl ErrorKind {
    /// Classifies a non-2xx status code.
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            _ => Self::HttpStatus(code),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::HttpStatus(code) => write!(f, "http status {code}"),
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Validation => f.write_str("validation"),
            Self::NotFound => f.write_str("not found"),
            Self::Unknown => f.write_str("unknown"),
            Self::InvalidRequest => f.write_str("invalid request"),
        }
    }
}

/// A structured failure: what went wrong and a message fit for display.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The failure classification.
    pub kind: ErrorKind,
    /// Server-provided or generic message.
    pub message: String,
}

impl ApiError {
    /// Creates a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an [`ErrorKind::Unauthorized`] error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Creates an [`ErrorKind::Unknown`] error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Builds the error for a non-2xx response.
    ///
    /// The message is the `error` field of a JSON body, or
    /// `HTTP error! status: {code}` when the body has none.
    #[must_use]
    pub fn from_response(code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("HTTP error! status: {code}"));

        Self::new(ErrorKind::from_status(code), message)
    }

    /// Returns `true` if the caller must re-authenticate.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(ErrorKind::Network, e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::InvalidRequest,
            format!("Failed to serialize request body: {e}"),
        )
    }
}

impl From<InvalidRequestError> for ApiError {
    fn from(e: InvalidRequestError) -> Self {
        Self::new(ErrorKind::InvalidRequest, e.to_string())
    }
}

/// Error returned when a request descriptor fails validation.
///
/// These are programmer errors; the request is never sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// GET requests never carry a body.
    #[error("Cannot send a body with a GET request to {path}.")]
    BodyOnGet {
        /// The request path.
        path: String,
    },

    /// Paths are relative to the base endpoint and must start with `/`.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The offending path.
        path: String,
    },

    /// A `{placeholder}` was left in the path.
    #[error("Request path '{path}' has unresolved placeholders.")]
    UnresolvedPlaceholder {
        /// The offending path.
        path: String,
    },
}
