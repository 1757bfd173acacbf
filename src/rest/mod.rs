//! REST resource infrastructure for the storefront backend.
//!
//! This module provides:
//!
//! - **Path building**: [`ResourcePath`] constants and [`build_path`]
//! - **Query serialisation**: [`serialize_to_query`] for parameter structs
//! - **Pagination**: [`Page<T>`] with envelope validation, nested or flat
//! - **[`resources`]**: one service per backend resource
//!
//! # Example: Using a Resource
//!
//! ```rust,ignore
//! use storefront_api::{ApiConfig, StorefrontClient};
//! use storefront_api::rest::resources::{CategoryInput, ProductQuery};
//!
//! let client = StorefrontClient::new(&ApiConfig::from_env()?)?;
//!
//! // Public catalog
//! let page = client.products().list(&ProductQuery::default()).await?;
//! println!("{} of {} products", page.len(), page.total_items);
//!
//! // Admin operations need an admin session
//! client.auth().login("admin@example.com", "secret").await?;
//! let category = client.admin_categories().create(&CategoryInput::new("Pumps")).await?;
//! ```

mod pagination;
mod path;
mod query;

pub mod resources;

// Public exports
pub use pagination::{Page, INCONSISTENT_ENVELOPE};
pub use path::{build_path, ResourcePath};
pub use query::serialize_to_query;
