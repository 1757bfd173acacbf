//! Contact forms and their administration.
//!
//! Visitors submit one of three forms (full, quick call-back, phone only);
//! administrators page through submissions, read and delete them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::CapabilityGate;
use crate::clients::{HttpClient, HttpMethod, Outcome};
use crate::rest::resources::Acknowledgement;
use crate::rest::{serialize_to_query, Page, ResourcePath};

const SUBMIT: ResourcePath = ResourcePath::new(HttpMethod::Post, "/contact", false);
const QUICK: ResourcePath = ResourcePath::new(HttpMethod::Post, "/quick-contact", false);
const PHONE_ONLY: ResourcePath = ResourcePath::new(HttpMethod::Post, "/phone-contact", false);
const LIST: ResourcePath = ResourcePath::new(HttpMethod::Get, "/admin/contacts", true);
const FIND: ResourcePath = ResourcePath::new(HttpMethod::Get, "/admin/contacts/{id}", true);
const MARK_READ: ResourcePath =
    ResourcePath::new(HttpMethod::Put, "/admin/contacts/{id}/read", true);
const DELETE: ResourcePath = ResourcePath::new(HttpMethod::Delete, "/admin/contacts/{id}", true);

/// Body of the full contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,

    /// Reply email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Call-back phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Subject line.
    pub subject: String,

    /// Message text.
    pub message: String,
}

#[derive(Serialize)]
struct QuickContact<'a> {
    name: &'a str,
    phone: &'a str,
}

#[derive(Serialize)]
struct PhoneContact<'a> {
    phone: &'a str,
}

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactSubmission {
    /// Backend submission ID.
    pub id: u64,

    /// Sender name.
    #[serde(default)]
    pub name: String,

    /// Reply email, empty when not given.
    #[serde(default)]
    pub email: String,

    /// Call-back phone number.
    #[serde(default)]
    pub phone: String,

    /// Subject line.
    #[serde(default)]
    pub subject: String,

    /// Message text.
    #[serde(default)]
    pub message: String,

    /// Whether an administrator has read the submission.
    #[serde(default)]
    pub is_read: bool,

    /// When the submission was received.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for listing submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactQuery {
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Only unread submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
}

/// Public contact form operations.
#[derive(Clone, Debug)]
pub struct ContactService {
    client: Arc<HttpClient>,
}

impl ContactService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Submits the full contact form.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the backend rejects the form.
    pub async fn submit(&self, form: &ContactForm) -> Outcome<Acknowledgement> {
        let request = SUBMIT
            .builder()
            .body(serde_json::to_value(form)?)
            .build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Requests a call-back.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the backend rejects the form.
    pub async fn quick(&self, name: &str, phone: &str) -> Outcome<Acknowledgement> {
        let request = QUICK
            .builder()
            .body(serde_json::to_value(QuickContact { name, phone })?)
            .build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Leaves only a phone number.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the backend rejects the number.
    pub async fn phone_only(&self, phone: &str) -> Outcome<Acknowledgement> {
        let request = PHONE_ONLY
            .builder()
            .body(serde_json::to_value(PhoneContact { phone })?)
            .build()?;
        self.client.dispatch(request).await?.json()
    }
}

/// Submission administration. Every operation requires an admin session.
#[derive(Clone, Debug)]
pub struct AdminContactService {
    client: Arc<HttpClient>,
    gate: CapabilityGate,
}

impl AdminContactService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let gate = CapabilityGate::new(Arc::clone(client.store()));
        Self { client, gate }
    }

    /// Lists submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, or `Unknown` if the pagination envelope is inconsistent.
    pub async fn list(&self, query: &ContactQuery) -> Outcome<Page<ContactSubmission>> {
        self.gate.require_admin()?;
        let request = LIST.builder().query(serialize_to_query(query)?).build()?;
        let response = self.client.dispatch(request).await?;
        Page::from_response(&response, "contacts")
    }

    /// Fetches a single submission.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the submission does not exist.
    pub async fn get(&self, id: u64) -> Outcome<ContactSubmission> {
        self.gate.require_admin()?;
        let request = FIND.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.field("contact")
    }

    /// Marks a submission as read.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the submission does not exist.
    pub async fn mark_read(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = MARK_READ.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Deletes a submission.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the submission does not exist.
    pub async fn delete(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = DELETE.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }
}
