//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use storefront_api::{AccessToken, ApiConfig, BaseUrl, Role, SessionStore, StorefrontClient, User};
use wiremock::MockServer;

/// Mount point of the API on the mock server.
pub const API_PREFIX: &str = "/api/v1";

/// Returns the full mock path for an API path.
pub fn api(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// Builds a configuration pointing at the mock server.
pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig::builder()
        .base_url(BaseUrl::new(format!("{}{API_PREFIX}", server.uri())).unwrap())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Creates a client with an empty in-memory session.
pub fn client_for(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&config_for(server)).unwrap()
}

/// Creates a client around `store`.
pub fn client_with_store(server: &MockServer, store: Arc<SessionStore>) -> StorefrontClient {
    StorefrontClient::with_store(&config_for(server), store).unwrap()
}

/// Creates a user with the given role.
pub fn user(id: u64, role: Role) -> User {
    User {
        id,
        name: format!("user-{id}"),
        email: format!("user{id}@example.com"),
        phone: None,
        role,
        created_at: None,
    }
}

/// Puts an admin session with token `token` into the client's store.
pub fn sign_in_admin(client: &StorefrontClient, token: &str) {
    client
        .store()
        .set(AccessToken::new(token), user(1, Role::Admin));
}

/// Puts a customer session with token `token` into the client's store.
pub fn sign_in_customer(client: &StorefrontClient, token: &str) {
    client
        .store()
        .set(AccessToken::new(token), user(2, Role::Customer));
}

/// A backend product record.
pub fn product_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": "",
        "price": 1990.0,
        "old_price": 0.0,
        "image": "",
        "category_id": 1,
        "brand": "Aquario",
        "model": "X1",
        "stock": 3,
        "is_active": true,
        "is_featured": false,
        "created_at": "2024-05-10T08:00:00Z",
        "updated_at": "2024-05-10T08:00:00Z"
    })
}

/// A backend pagination object.
pub fn pagination_json(page: u32, limit: u32, total: u64, total_pages: u32) -> serde_json::Value {
    serde_json::json!({
        "page": page,
        "limit": limit,
        "total": total,
        "total_pages": total_pages
    })
}
