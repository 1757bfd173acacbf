//! Product categories.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::CapabilityGate;
use crate::clients::{HttpClient, HttpMethod, Outcome};
use crate::rest::resources::Acknowledgement;
use crate::rest::ResourcePath;

const LIST: ResourcePath = ResourcePath::new(HttpMethod::Get, "/categories", false);
const CREATE: ResourcePath = ResourcePath::new(HttpMethod::Post, "/admin/categories", true);
const UPDATE: ResourcePath = ResourcePath::new(HttpMethod::Put, "/admin/categories/{id}", true);
const DELETE: ResourcePath =
    ResourcePath::new(HttpMethod::Delete, "/admin/categories/{id}", true);

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Backend category ID.
    pub id: u64,

    /// Category name.
    #[serde(default)]
    pub name: String,

    /// Description.
    #[serde(default)]
    pub description: String,

    /// Image URL or path.
    #[serde(default)]
    pub image: String,

    /// Whether the category is shown.
    #[serde(default)]
    pub is_active: bool,

    /// When the category was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the category was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    /// Category name (required by the backend).
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether the category is shown.
    pub is_active: bool,
}

impl CategoryInput {
    /// Creates an active category input.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_active: true,
        }
    }
}

/// Public category operations.
#[derive(Clone, Debug)]
pub struct CategoryService {
    client: Arc<HttpClient>,
}

impl CategoryService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists all active categories.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn list(&self) -> Outcome<Vec<Category>> {
        let request = LIST.builder().build()?;
        self.client.dispatch(request).await?.field("categories")
    }
}

/// Category administration. Every operation requires an admin session.
#[derive(Clone, Debug)]
pub struct AdminCategoryService {
    client: Arc<HttpClient>,
    gate: CapabilityGate,
}

impl AdminCategoryService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let gate = CapabilityGate::new(Arc::clone(client.store()));
        Self { client, gate }
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin.
    pub async fn create(&self, input: &CategoryInput) -> Outcome<Category> {
        self.gate.require_admin()?;
        let request = CREATE
            .builder()
            .body(serde_json::to_value(input)?)
            .build()?;
        self.client.dispatch(request).await?.field("category")
    }

    /// Updates a category.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the category does not exist.
    pub async fn update(&self, id: u64, input: &CategoryInput) -> Outcome<Category> {
        self.gate.require_admin()?;
        let request = UPDATE
            .request(&[("id", id)])
            .body(serde_json::to_value(input)?)
            .build()?;
        self.client.dispatch(request).await?.field("category")
    }

    /// Deletes a category. The backend refuses categories that still have
    /// products (`Validation`).
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin.
    pub async fn delete(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = DELETE.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }
}
