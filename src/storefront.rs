//! The top-level client wiring configuration, session and services together.

use std::sync::Arc;

use crate::auth::{CapabilityGate, SessionStore};
use crate::clients::HttpClient;
use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::rest::resources::{
    AdminAnalyticsService, AdminCategoryService, AdminContactService, AdminProductService,
    AdminUserService, AnalyticsService, AuthService, CategoryService, ContactService,
    ProductService,
};

/// Entry point to the storefront API.
///
/// Owns one gateway and one session store; every service handed out shares
/// them, so a login through [`auth`](Self::auth) is immediately visible to
/// [`admin_products`](Self::admin_products).
///
/// # Example
///
/// ```rust
/// use storefront_api::{ApiConfig, StorefrontClient};
///
/// let client = StorefrontClient::new(&ApiConfig::builder().build().unwrap()).unwrap();
/// assert!(!client.capabilities().is_authenticated());
/// ```
#[derive(Clone, Debug)]
pub struct StorefrontClient {
    http: Arc<HttpClient>,
    gate: CapabilityGate,
}

// Verify StorefrontClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontClient>();
};

impl StorefrontClient {
    /// Creates a client with an empty in-memory session store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the HTTP client cannot be
    /// created.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        Self::with_store(config, Arc::new(SessionStore::new()))
    }

    /// Creates a client around an existing session store.
    ///
    /// Use this with [`SessionStore::with_storage`] to resume a persisted
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the HTTP client cannot be
    /// created.
    pub fn with_store(config: &ApiConfig, store: Arc<SessionStore>) -> Result<Self, ConfigError> {
        let gate = CapabilityGate::new(Arc::clone(&store));
        let http = Arc::new(HttpClient::new(config, store)?);
        Ok(Self { http, gate })
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Returns the session store.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        self.http.store()
    }

    /// Returns the capability gate for the session store.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilityGate {
        &self.gate
    }

    /// Login, registration and profile operations.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.http))
    }

    /// Public product catalog.
    #[must_use]
    pub fn products(&self) -> ProductService {
        ProductService::new(Arc::clone(&self.http))
    }

    /// Public category listing.
    #[must_use]
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.http))
    }

    /// Public contact forms.
    #[must_use]
    pub fn contacts(&self) -> ContactService {
        ContactService::new(Arc::clone(&self.http))
    }

    /// Visit and phone-click tracking.
    #[must_use]
    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(Arc::clone(&self.http))
    }

    /// Product administration.
    #[must_use]
    pub fn admin_products(&self) -> AdminProductService {
        AdminProductService::new(Arc::clone(&self.http))
    }

    /// Category administration.
    #[must_use]
    pub fn admin_categories(&self) -> AdminCategoryService {
        AdminCategoryService::new(Arc::clone(&self.http))
    }

    /// User administration.
    #[must_use]
    pub fn admin_users(&self) -> AdminUserService {
        AdminUserService::new(Arc::clone(&self.http))
    }

    /// Contact submission administration.
    #[must_use]
    pub fn admin_contacts(&self) -> AdminContactService {
        AdminContactService::new(Arc::clone(&self.http))
    }

    /// Analytics reports and phone-contact administration.
    #[must_use]
    pub fn admin_analytics(&self) -> AdminAnalyticsService {
        AdminAnalyticsService::new(Arc::clone(&self.http))
    }
}
