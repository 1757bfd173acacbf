//! Product catalog and product administration.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::rest::resources::ProductQuery;
//!
//! let page = client.products().list(&ProductQuery {
//!     category: Some(3),
//!     limit: Some(12),
//!     ..Default::default()
//! }).await?;
//!
//! for product in page.iter() {
//!     println!("{} - {:.2}", product.name, product.price);
//! }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::CapabilityGate;
use crate::clients::{HttpClient, HttpMethod, Outcome};
use crate::rest::resources::{Acknowledgement, Category};
use crate::rest::{serialize_to_query, Page, ResourcePath};

const LIST: ResourcePath = ResourcePath::new(HttpMethod::Get, "/products", false);
const FIND: ResourcePath = ResourcePath::new(HttpMethod::Get, "/products/{id}", false);
const CREATE: ResourcePath = ResourcePath::new(HttpMethod::Post, "/admin/products", true);
const UPDATE: ResourcePath = ResourcePath::new(HttpMethod::Put, "/admin/products/{id}", true);
const DELETE: ResourcePath = ResourcePath::new(HttpMethod::Delete, "/admin/products/{id}", true);

/// Number of products returned by [`ProductService::featured`] by default.
pub const DEFAULT_FEATURED_LIMIT: u32 = 8;

/// A catalog product.
///
/// Only `id` is required; every other field falls back to its empty value
/// when the backend omits it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Backend product ID.
    pub id: u64,

    /// Product name.
    #[serde(default)]
    pub name: String,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// Current price.
    #[serde(default)]
    pub price: f64,

    /// Previous price, `0` when the product is not discounted.
    #[serde(default)]
    pub old_price: f64,

    /// Image URL or path.
    #[serde(default)]
    pub image: String,

    /// ID of the owning category.
    #[serde(default)]
    pub category_id: u64,

    /// Manufacturer.
    #[serde(default)]
    pub brand: String,

    /// Model designation.
    #[serde(default)]
    pub model: String,

    /// Units in stock.
    #[serde(default)]
    pub stock: i64,

    /// Whether the product is listed.
    #[serde(default)]
    pub is_active: bool,

    /// Whether the product is featured on the storefront.
    #[serde(default)]
    pub is_featured: bool,

    /// The owning category, when the backend embeds it.
    #[serde(default)]
    pub category: Option<Category>,

    /// When the product was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns `true` if the product has a higher previous price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.old_price > self.price
    }

    /// Returns `true` if at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first (backend default).
    Desc,
}

/// Parameters for listing products.
///
/// Unset fields are not sent; the backend then applies page 1, 12 per page,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Only products of this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,

    /// Full-text search over name, description, brand and model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only featured products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    /// Column to sort by (e.g., `price`, `name`, `created_at`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

/// Body for creating or updating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductInput {
    /// Product name (required by the backend).
    pub name: String,
    /// Long description.
    pub description: String,
    /// Price, must be positive.
    pub price: f64,
    /// Previous price.
    pub old_price: f64,
    /// Owning category (required by the backend).
    pub category_id: u64,
    /// Manufacturer.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Units in stock.
    pub stock: i64,
    /// Whether the product is listed.
    pub is_active: bool,
    /// Whether the product is featured.
    pub is_featured: bool,
}

impl ProductInput {
    /// Creates an active product input with the backend's required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, category_id: u64) -> Self {
        Self {
            name: name.into(),
            price,
            category_id,
            is_active: true,
            ..Default::default()
        }
    }
}

/// Public catalog operations.
#[derive(Clone, Debug)]
pub struct ProductService {
    client: Arc<HttpClient>,
}

impl ProductService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError), or
    /// `Unknown` if the pagination envelope is inconsistent.
    pub async fn list(&self, query: &ProductQuery) -> Outcome<Page<Product>> {
        let request = LIST.builder().query(serialize_to_query(query)?).build()?;
        let response = self.client.dispatch(request).await?;
        Page::from_response(&response, "products")
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub async fn get(&self, id: u64) -> Outcome<Product> {
        let request = FIND.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.field("product")
    }

    /// Lists featured products, [`DEFAULT_FEATURED_LIMIT`] when `limit` is `None`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn featured(&self, limit: Option<u32>) -> Outcome<Page<Product>> {
        self.list(&ProductQuery {
            featured: Some(true),
            limit: Some(limit.unwrap_or(DEFAULT_FEATURED_LIMIT)),
            ..Default::default()
        })
        .await
    }

    /// Searches products, keeping the other filters of `query`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn search(&self, text: &str, query: &ProductQuery) -> Outcome<Page<Product>> {
        self.list(&ProductQuery {
            search: Some(text.to_string()),
            ..query.clone()
        })
        .await
    }

    /// Lists the products of one category, keeping the other filters of `query`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn by_category(
        &self,
        category_id: u64,
        query: &ProductQuery,
    ) -> Outcome<Page<Product>> {
        self.list(&ProductQuery {
            category: Some(category_id),
            ..query.clone()
        })
        .await
    }
}

/// Product administration. Every operation requires an admin session.
#[derive(Clone, Debug)]
pub struct AdminProductService {
    client: Arc<HttpClient>,
    gate: CapabilityGate,
}

impl AdminProductService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let gate = CapabilityGate::new(Arc::clone(client.store()));
        Self { client, gate }
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `Validation` if the backend rejects the input.
    pub async fn create(&self, input: &ProductInput) -> Outcome<Product> {
        self.gate.require_admin()?;
        let request = CREATE
            .builder()
            .body(serde_json::to_value(input)?)
            .build()?;
        self.client.dispatch(request).await?.field("product")
    }

    /// Updates a product.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the product does not exist.
    pub async fn update(&self, id: u64, input: &ProductInput) -> Outcome<Product> {
        self.gate.require_admin()?;
        let request = UPDATE
            .request(&[("id", id)])
            .body(serde_json::to_value(input)?)
            .build()?;
        self.client.dispatch(request).await?.field("product")
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the product does not exist.
    pub async fn delete(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = DELETE.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }
}
