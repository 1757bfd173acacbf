//! Configuration error types for the storefront API client.
//!
//! Request failures are not reported through this module; they are values of
//! [`ApiError`](crate::clients::ApiError). This module only covers problems
//! found while building an [`ApiConfig`](crate::ApiConfig) or the HTTP client.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("localhost:8080");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'http://localhost:8080/api/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Timeout is zero or could not be parsed.
    #[error("Invalid timeout '{value}'. Expected a positive number of seconds.")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to initialise HTTP client: {reason}")]
    HttpClientInit {
        /// Why initialisation failed.
        reason: String,
    },
}
