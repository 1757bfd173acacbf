//! Client-side authorization checks derived from the session store.
//!
//! The gate only saves pointless round trips. The backend remains the
//! authority: a request the gate lets through can still come back 401.

use std::sync::Arc;

use crate::auth::store::SessionStore;
use crate::clients::{ApiError, Outcome};

/// Message returned when an admin operation is attempted without admin rights.
pub const ADMIN_REQUIRED: &str = "admin access required";

/// Read-only view of what the current session may attempt.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use storefront_api::{AccessToken, CapabilityGate, SessionStore, User};
///
/// let store = Arc::new(SessionStore::new());
/// let gate = CapabilityGate::new(Arc::clone(&store));
/// assert!(gate.require_admin().is_err());
///
/// let admin: User = serde_json::from_str(r#"{"id":1,"role":"admin"}"#).unwrap();
/// store.set(AccessToken::new("t"), admin);
/// assert!(gate.can_access_admin());
/// assert!(gate.require_admin().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct CapabilityGate {
    store: Arc<SessionStore>,
}

impl CapabilityGate {
    /// Creates a gate reading from `store`.
    #[must_use]
    pub const fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Returns `true` if a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Returns `true` if the session belongs to an administrator.
    #[must_use]
    pub fn can_access_admin(&self) -> bool {
        self.store.is_admin()
    }

    /// Fails with `Unauthorized` unless the session belongs to an administrator.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Unauthorized`](crate::clients::ErrorKind::Unauthorized)
    /// error when there is no session or its role is not admin.
    pub fn require_admin(&self) -> Outcome<()> {
        if self.can_access_admin() {
            return Ok(());
        }

        tracing::debug!(
            authenticated = self.is_authenticated(),
            "Admin operation short-circuited by capability gate"
        );
        Err(ApiError::unauthorized(ADMIN_REQUIRED))
    }
}
