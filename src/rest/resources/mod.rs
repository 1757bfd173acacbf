//! Resource services for the storefront backend.
//!
//! Each service is a thin set of named operations; one operation is one
//! gateway dispatch. Services hold an `Arc<HttpClient>` and are cheap to clone.
//!
//! | Service | Backend paths | Auth |
//! |---|---|---|
//! | [`AuthService`] | `/login`, `/register`, `/profile` | profile only |
//! | [`ProductService`] | `/products` | no |
//! | [`CategoryService`] | `/categories` | no |
//! | [`ContactService`] | `/contact`, `/quick-contact`, `/phone-contact` | no |
//! | [`AnalyticsService`] | `/track-visitor`, `/track-phone-click` | no |
//! | [`AdminProductService`] | `/admin/products` | admin |
//! | [`AdminCategoryService`] | `/admin/categories` | admin |
//! | [`AdminUserService`] | `/admin/users` | admin |
//! | [`AdminContactService`] | `/admin/contacts` | admin |
//! | [`AdminAnalyticsService`] | `/admin/visitor-stats`, `/admin/phone-click-stats`, `/admin/phone-contacts` | admin |
//!
//! Admin services consult the [`CapabilityGate`](crate::auth::CapabilityGate)
//! before dispatching, so a caller without an admin session gets
//! `Unauthorized` without a network call.

mod analytics;
mod auth;
mod categories;
mod contacts;
mod products;
mod users;

use serde::Deserialize;

pub use analytics::{
    AdminAnalyticsService, AnalyticsService, DailyStat, MonthlyStat, PhoneClickStats, PhoneContact,
    PhoneContactQuery, VisitorStats,
};
pub use auth::{AuthPayload, AuthService, ProfileUpdate, RegisterRequest};
pub use categories::{AdminCategoryService, Category, CategoryInput, CategoryService};
pub use contacts::{
    AdminContactService, ContactForm, ContactQuery, ContactService, ContactSubmission,
};
pub use products::{
    AdminProductService, Product, ProductInput, ProductQuery, ProductService, SortOrder,
    DEFAULT_FEATURED_LIMIT,
};
pub use users::{AdminUserService, UserQuery, UserRecord, UserUpdate};

/// Confirmation returned by mutations that do not echo a record.
///
/// Contact submissions also return the new submission's `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    /// Server-provided confirmation text.
    #[serde(default)]
    pub message: String,

    /// ID of the record the mutation created, if any.
    #[serde(default)]
    pub id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acknowledgement_with_and_without_id() {
        let ack: Acknowledgement =
            serde_json::from_value(json!({"message": "sent", "id": 14})).unwrap();
        assert_eq!(ack.message, "sent");
        assert_eq!(ack.id, Some(14));

        let ack: Acknowledgement = serde_json::from_value(json!({"message": "deleted"})).unwrap();
        assert!(ack.id.is_none());
    }
}
