//! User administration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::auth::{CapabilityGate, Role, User};
use crate::clients::{HttpClient, HttpMethod, Outcome};
use crate::rest::resources::Acknowledgement;
use crate::rest::{serialize_to_query, Page, ResourcePath};

const LIST: ResourcePath = ResourcePath::new(HttpMethod::Get, "/admin/users", true);
const UPDATE: ResourcePath = ResourcePath::new(HttpMethod::Put, "/admin/users/{id}", true);
const DELETE: ResourcePath = ResourcePath::new(HttpMethod::Delete, "/admin/users/{id}", true);

/// A user account as seen by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    /// Backend user ID.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Login email.
    #[serde(default)]
    pub email: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// The user's role.
    pub role: Role,

    /// Whether the account may log in.
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            role: record.role,
            created_at: record.created_at,
        }
    }
}

/// Parameters for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserQuery {
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body of `PUT /admin/users/{id}`.
///
/// `name`, `phone` and `role` are only changed when set; `is_active` is
/// always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// New role.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_backend_role"
    )]
    pub role: Option<Role>,

    /// Whether the account may log in.
    pub is_active: bool,
}

impl Default for UserUpdate {
    fn default() -> Self {
        Self {
            name: None,
            phone: None,
            role: None,
            is_active: true,
        }
    }
}

// The backend stores customers under the role name "user"
#[allow(clippy::ref_option)]
fn serialize_backend_role<S: Serializer>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error> {
    match role {
        Some(Role::Customer) => serializer.serialize_str("user"),
        Some(Role::Admin) => serializer.serialize_str("admin"),
        None => serializer.serialize_none(),
    }
}

/// User administration. Every operation requires an admin session.
#[derive(Clone, Debug)]
pub struct AdminUserService {
    client: Arc<HttpClient>,
    gate: CapabilityGate,
}

impl AdminUserService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let gate = CapabilityGate::new(Arc::clone(client.store()));
        Self { client, gate }
    }

    /// Lists user accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, or `Unknown` if the pagination envelope is inconsistent.
    pub async fn list(&self, query: &UserQuery) -> Outcome<Page<UserRecord>> {
        self.gate.require_admin()?;
        let request = LIST.builder().query(serialize_to_query(query)?).build()?;
        let response = self.client.dispatch(request).await?;
        Page::from_response(&response, "users")
    }

    /// Updates a user account.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the account does not exist.
    pub async fn update(&self, id: u64, update: &UserUpdate) -> Outcome<UserRecord> {
        self.gate.require_admin()?;
        let request = UPDATE
            .request(&[("id", id)])
            .body(serde_json::to_value(update)?)
            .build()?;
        self.client.dispatch(request).await?.field("user")
    }

    /// Deletes a user account. The backend refuses to delete the caller's own
    /// account (`Validation`).
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the account does not exist.
    pub async fn delete(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = DELETE.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }
}
