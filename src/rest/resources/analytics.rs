//! Visitor analytics and phone-contact administration.
//!
//! The storefront reports page visits and clicks on the phone button through
//! [`AnalyticsService`]; the backend attributes them to the caller's IP
//! address. Administrators read the aggregates and manage the numbers left
//! through the phone-only form with [`AdminAnalyticsService`].
//!
//! # Example
//!
//! ```rust,ignore
//! client.analytics().track_visit().await?;
//!
//! let stats = client.admin_analytics().visitor_stats(Some(7)).await?;
//! for day in &stats.daily_stats {
//!     println!("{}: {} unique", day.date, day.unique_views);
//! }
//! ```

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::CapabilityGate;
use crate::clients::{HttpClient, HttpMethod, Outcome};
use crate::rest::resources::Acknowledgement;
use crate::rest::{serialize_to_query, Page, ResourcePath};

const TRACK_VISIT: ResourcePath = ResourcePath::new(HttpMethod::Post, "/track-visitor", false);
const TRACK_PHONE_CLICK: ResourcePath =
    ResourcePath::new(HttpMethod::Post, "/track-phone-click", false);
const VISITOR_STATS: ResourcePath =
    ResourcePath::new(HttpMethod::Get, "/admin/visitor-stats", true);
const PHONE_CLICK_STATS: ResourcePath =
    ResourcePath::new(HttpMethod::Get, "/admin/phone-click-stats", true);
const PHONE_CONTACTS: ResourcePath =
    ResourcePath::new(HttpMethod::Get, "/admin/phone-contacts", true);
const DELETE_PHONE_CONTACT: ResourcePath =
    ResourcePath::new(HttpMethod::Delete, "/admin/phone-contacts/{id}", true);

/// Visits or clicks on one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyStat {
    /// The day.
    pub date: NaiveDate,
    /// Distinct IP addresses.
    #[serde(default)]
    pub unique_views: u64,
    /// All recorded events.
    #[serde(default)]
    pub total_views: u64,
}

/// Visits in one month.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonthlyStat {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Distinct IP addresses.
    #[serde(default)]
    pub unique_views: u64,
    /// All recorded visits.
    #[serde(default)]
    pub total_views: u64,
}

/// Response of `GET /admin/visitor-stats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisitorStats {
    /// Per-day figures for the requested period, newest first.
    #[serde(default, deserialize_with = "nullable_list")]
    pub daily_stats: Vec<DailyStat>,
    /// Per-month figures for the last twelve months, newest first.
    #[serde(default, deserialize_with = "nullable_list")]
    pub monthly_stats: Vec<MonthlyStat>,
    /// Distinct visitors of all time.
    #[serde(default)]
    pub total_unique: u64,
}

/// Response of `GET /admin/phone-click-stats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneClickStats {
    /// Clicks in the requested period.
    #[serde(default)]
    pub total_clicks: u64,
    /// Distinct IP addresses that clicked in the requested period.
    #[serde(default)]
    pub unique_clicks: u64,
    /// Per-day figures, newest first.
    #[serde(default, deserialize_with = "nullable_list")]
    pub daily_clicks: Vec<DailyStat>,
}

/// A number left through the phone-only form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneContact {
    /// Backend record ID.
    pub id: u64,
    /// The phone number as entered.
    #[serde(default)]
    pub phone: String,
    /// When the number was left.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for listing phone contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhoneContactQuery {
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size, at most 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Serialize)]
struct StatsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
}

// Empty aggregates come back as `null`
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Public tracking operations.
#[derive(Clone, Debug)]
pub struct AnalyticsService {
    client: Arc<HttpClient>,
}

impl AnalyticsService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Records a visit. Repeat visits from one address on the same day are
    /// counted once.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn track_visit(&self) -> Outcome<Acknowledgement> {
        let request = TRACK_VISIT.builder().build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Records a click on the phone button.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn track_phone_click(&self) -> Outcome<Acknowledgement> {
        let request = TRACK_PHONE_CLICK.builder().build()?;
        self.client.dispatch(request).await?.json()
    }
}

/// Analytics and phone-contact administration. Every operation requires an
/// admin session.
#[derive(Clone, Debug)]
pub struct AdminAnalyticsService {
    client: Arc<HttpClient>,
    gate: CapabilityGate,
}

impl AdminAnalyticsService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        let gate = CapabilityGate::new(Arc::clone(client.store()));
        Self { client, gate }
    }

    /// Returns visitor figures for the last `days` days (backend default 30).
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin.
    pub async fn visitor_stats(&self, days: Option<u32>) -> Outcome<VisitorStats> {
        self.gate.require_admin()?;
        let request = VISITOR_STATS
            .builder()
            .query(serialize_to_query(&StatsQuery { days })?)
            .build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Returns phone-button figures for the last `days` days (backend default 30).
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin.
    pub async fn phone_click_stats(&self, days: Option<u32>) -> Outcome<PhoneClickStats> {
        self.gate.require_admin()?;
        let request = PHONE_CLICK_STATS
            .builder()
            .query(serialize_to_query(&StatsQuery { days })?)
            .build()?;
        self.client.dispatch(request).await?.json()
    }

    /// Lists phone contacts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, or `Unknown` if the pagination counters are inconsistent.
    pub async fn phone_contacts(&self, query: &PhoneContactQuery) -> Outcome<Page<PhoneContact>> {
        self.gate.require_admin()?;
        let request = PHONE_CONTACTS
            .builder()
            .query(serialize_to_query(query)?)
            .build()?;
        let response = self.client.dispatch(request).await?;
        Page::from_flat_response(&response, "contacts")
    }

    /// Deletes a phone contact.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call unless the session is an
    /// admin, and `NotFound` if the contact does not exist.
    pub async fn delete_phone_contact(&self, id: u64) -> Outcome<Acknowledgement> {
        self.gate.require_admin()?;
        let request = DELETE_PHONE_CONTACT.request(&[("id", id)]).build()?;
        self.client.dispatch(request).await?.json()
    }
}
