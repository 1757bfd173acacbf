//! Login, registration and profile operations.
//!
//! This is the only service that writes the session: a successful
//! [`login`](AuthService::login) or [`register`](AuthService::register)
//! replaces it, [`update_profile`](AuthService::update_profile) replaces its
//! user, and [`logout`](AuthService::logout) clears it.
//!
//! # Example
//!
//! ```rust,ignore
//! let auth = client.auth();
//! let payload = auth.login("a@b.com", "secret").await?;
//! assert!(auth.is_authenticated());
//! println!("Welcome, {}", payload.user.name);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{AccessToken, User};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, Outcome};
use crate::rest::ResourcePath;

const LOGIN: ResourcePath = ResourcePath::new(HttpMethod::Post, "/login", false);
const REGISTER: ResourcePath = ResourcePath::new(HttpMethod::Post, "/register", false);
const PROFILE: ResourcePath = ResourcePath::new(HttpMethod::Get, "/profile", true);
const UPDATE_PROFILE: ResourcePath = ResourcePath::new(HttpMethod::Put, "/profile", true);

/// Response of `/login` and `/register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// The authenticated user.
    pub user: User,

    /// Server-provided greeting.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Password.
    pub password: String,

    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `PUT /profile`. Unset fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Authentication operations.
#[derive(Clone, Debug)]
pub struct AuthService {
    client: Arc<HttpClient>,
}

impl AuthService {
    /// Creates a new service dispatching through `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Logs in and stores the returned session.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError); a wrong
    /// password is reported with the server's message.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<AuthPayload> {
        let request = LOGIN
            .builder()
            .body(serde_json::to_value(Credentials { email, password })?)
            .build()?;

        self.start_session(request).await
    }

    /// Registers a new account and stores the returned session.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`ApiError`](crate::clients::ApiError).
    pub async fn register(&self, registration: &RegisterRequest) -> Outcome<AuthPayload> {
        let request = REGISTER
            .builder()
            .body(serde_json::to_value(registration)?)
            .build()?;

        self.start_session(request).await
    }

    /// Fetches the profile of the current user.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call when there is no session.
    pub async fn profile(&self) -> Outcome<User> {
        let request = PROFILE.builder().build()?;
        self.client.dispatch(request).await?.field("user")
    }

    /// Updates the profile and replaces the stored user, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without a network call when there is no session.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Outcome<User> {
        let request = UPDATE_PROFILE
            .builder()
            .body(serde_json::to_value(update)?)
            .build()?;

        let user: User = self.client.dispatch(request).await?.field("user")?;
        self.client.store().update_user(user.clone());
        Ok(user)
    }

    /// Ends the session.
    pub fn logout(&self) {
        tracing::debug!("Logging out");
        self.client.store().clear();
    }

    /// Returns the user of the current session.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.client.store().current_user()
    }

    /// Returns `true` if a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.store().is_authenticated()
    }

    /// Returns `true` if the session belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.client.store().is_admin()
    }

    async fn start_session(&self, request: HttpRequest) -> Outcome<AuthPayload> {
        let payload: AuthPayload = self.client.dispatch(request).await?.json()?;

        self.client
            .store()
            .set(AccessToken::new(payload.token.clone()), payload.user.clone());
        tracing::debug!(user_id = payload.user.id, "Session started");

        Ok(payload)
    }
}
