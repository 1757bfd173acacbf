//! Path building infrastructure for REST resources.
//!
//! Every resource operation is described by a constant [`ResourcePath`]: the
//! verb, a path template with `{name}` placeholders, and whether the backend
//! requires a bearer token. [`ResourcePath::request`] interpolates the IDs and
//! returns a request builder with the verb and auth flag already applied.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::rest::{build_path, ResourcePath};
//! use storefront_api::clients::HttpMethod;
//!
//! const MARK_READ: ResourcePath =
//!     ResourcePath::new(HttpMethod::Put, "/admin/contacts/{id}/read", true);
//!
//! let request = MARK_READ.request(&[("id", 12)]).build().unwrap();
//! assert_eq!(request.path, "/admin/contacts/12/read");
//! assert!(request.requires_auth);
//!
//! assert_eq!(build_path("/products/{id}", &[("id", "7")]), "/products/7");
//! ```

use std::fmt::Display;

use crate::clients::{HttpMethod, HttpRequest, HttpRequestBuilder};

/// A path configuration for a REST resource operation.
///
/// # Path Templates
///
/// Templates use `{id_name}` placeholders for ID interpolation:
/// - `/products/{id}` - Single ID
/// - `/admin/contacts/{id}/read` - ID followed by an action
///
/// A placeholder left unresolved is caught when the request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
    /// Whether the bearer token must be attached.
    pub requires_auth: bool,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(http_method: HttpMethod, template: &'static str, requires_auth: bool) -> Self {
        Self {
            http_method,
            template,
            requires_auth,
        }
    }

    /// Returns a request builder for a path without placeholders.
    #[must_use]
    pub fn builder(&self) -> HttpRequestBuilder {
        HttpRequest::builder(self.http_method, self.template).requires_auth(self.requires_auth)
    }

    /// Returns a request builder for this path with `ids` interpolated.
    #[must_use]
    pub fn request<V: Display>(&self, ids: &[(&str, V)]) -> HttpRequestBuilder {
        HttpRequest::builder(self.http_method, build_path(self.template, ids))
            .requires_auth(self.requires_auth)
    }
}

/// Builds a path from a template by interpolating IDs.
///
/// Replaces `{id_name}` placeholders in the template with the matching value.
/// Placeholders with no matching entry are left in place.
#[must_use]
pub fn build_path<V: Display>(template: &str, ids: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourcePath>();
};
