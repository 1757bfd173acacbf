//! HTTP client types for storefront API communication.
//!
//! This module provides the request gateway every resource operation goes
//! through. It handles request validation, bearer token attachment and
//! normalisation of every response into an [`Outcome`].
//!
//! # Overview
//!
//! - [`HttpClient`]: the async gateway ([`HttpClient::dispatch`])
//! - [`HttpRequest`]: a request descriptor, built with [`HttpRequestBuilder`]
//! - [`HttpResponse`]: a successful (2xx) response
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiError`], [`ErrorKind`], [`Outcome`]: the uniform failure shape
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_api::{ApiConfig, SessionStore};
//! use storefront_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&ApiConfig::from_env()?, Arc::new(SessionStore::new()))?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/products")
//!     .query_param("page", "1")
//!     .build()?;
//!
//! let response = client.dispatch(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Nothing is retried automatically. A `Network` failure is returned to the
//! caller, which may re-invoke the same operation.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, ErrorKind, InvalidRequestError, Outcome};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
