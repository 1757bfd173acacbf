//! # Storefront API Client
//!
//! An async client and session layer for the storefront REST backend: the
//! product catalog, categories, contact forms, customer accounts, visit
//! tracking and the admin panel operations behind them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - A [`SessionStore`] that keeps the bearer token and its user together,
//!   optionally persisted to a [`CredentialStorage`] medium
//! - A single request gateway ([`HttpClient::dispatch`]) that attaches
//!   credentials and turns every response into an [`Outcome`]
//! - A [`CapabilityGate`] that short-circuits admin calls for non-admins
//! - One service per backend resource under [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_api::{ApiConfig, BaseUrl, StorefrontClient};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://shop.example.com/api/v1").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! let client = StorefrontClient::new(&config).unwrap();
//! assert!(!client.auth().is_authenticated());
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use storefront_api::{ApiConfig, ErrorKind, StorefrontClient};
//!
//! let client = StorefrontClient::new(&ApiConfig::from_env()?)?;
//!
//! match client.auth().login("a@b.com", "secret").await {
//!     Ok(payload) => println!("Hello, {}", payload.user.name),
//!     Err(e) if e.kind == ErrorKind::Unauthorized => println!("{}", e.message),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! // Any authenticated call answered with 401 clears the session
//! if let Err(e) = client.auth().profile().await {
//!     if e.is_unauthorized() {
//!         assert!(!client.auth().is_authenticated());
//!     }
//! }
//! ```
//!
//! ## Persisted Sessions
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_api::{ApiConfig, FileStorage, SessionStore, StorefrontClient};
//!
//! let storage = FileStorage::open("session.json")?;
//! let store = Arc::new(SessionStore::with_storage(storage));
//! let client = StorefrontClient::with_store(&ApiConfig::from_env()?, store)?;
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Tokens are
//! never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: the session store is an instance passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **One failure shape**: every operation returns [`Outcome`]

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
mod storefront;

// Re-export public types at crate root for convenience
pub use auth::{
    AccessToken, CapabilityGate, CredentialStorage, FileStorage, MemoryStorage, Role, Session,
    SessionStore, StorageError, User,
};
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl};
pub use error::ConfigError;
pub use storefront::StorefrontClient;

// Re-export HTTP client types
pub use clients::{
    ApiError, ErrorKind, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidRequestError, Outcome,
};

// Re-export pagination
pub use rest::Page;
