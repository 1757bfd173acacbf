//! Session types for authenticated storefront API calls.
//!
//! A [`Session`] always carries both a bearer [`AccessToken`] and the
//! identity of the [`User`] it belongs to. "No session" is expressed as
//! `Option<Session>::None`, so a token without a user (or a user without a
//! token) cannot be represented.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
///
/// The backend reports ordinary customers as `"user"`; both spellings
/// deserialize to [`Role::Customer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A storefront customer.
    #[serde(alias = "user")]
    Customer,
    /// A shop administrator.
    Admin,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the user owning a session.
///
/// `name` and `email` default to empty strings when the backend omits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user ID.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Login email.
    #[serde(default)]
    pub email: String,

    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// The user's role.
    pub role: Role,

    /// When the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns `true` if the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// An opaque bearer credential.
///
/// The `Debug` implementation masks the value so tokens never end up in logs.
///
/// # Example
///
/// ```rust
/// use storefront_api::AccessToken;
///
/// let token = AccessToken::new("secret-token");
/// assert_eq!(format!("{token:?}"), "AccessToken(*****)");
/// assert_eq!(token.as_ref(), "secret-token");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns the `exp` claim of a JWT token.
    ///
    /// The signature is not checked: the client holds no key and only uses the
    /// claim to avoid sending credentials it already knows are stale. Tokens
    /// that are not JWTs, or JWTs without `exp`, return `None`.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<ExpiryClaim>(
            &self.0,
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .ok()?;

        data.claims
            .exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Returns `true` if the token carries an expiry that lies in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() >= expires)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// An authenticated session: a bearer token and the user it identifies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// The bearer credential.
    pub token: AccessToken,

    /// The identity the credential belongs to.
    pub user: User,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub const fn new(token: AccessToken, user: User) -> Self {
        Self { token, user }
    }

    /// Returns `true` if the session belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
