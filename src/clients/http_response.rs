//! Successful responses returned by the gateway.
//!
//! The gateway only hands back 2xx responses; every other status becomes an
//! [`ApiError`](crate::clients::ApiError). Resource services then pull typed
//! records out of the JSON body with [`HttpResponse::field`] or
//! [`HttpResponse::json`].

use serde::de::DeserializeOwned;

use crate::clients::errors::{ApiError, Outcome};

/// Message used for any body that does not match the expected shape.
pub(crate) const MALFORMED_BODY: &str = "malformed response body";

/// A successful HTTP response from the storefront backend.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The parsed response body. An empty body is `{}`.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, body: serde_json::Value) -> Self {
        Self { code, body }
    }

    /// Deserializes the top-level field `key` of the body.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Unknown`](crate::clients::ErrorKind::Unknown)
    /// error if the field is missing or does not have the expected shape.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Outcome<T> {
        let value = self.body.get(key).ok_or_else(|| {
            tracing::debug!("Response body has no '{}' field", key);
            ApiError::malformed(MALFORMED_BODY)
        })?;

        T::deserialize(value).map_err(|e| {
            tracing::debug!("Response field '{}' has unexpected shape: {}", key, e);
            ApiError::malformed(MALFORMED_BODY)
        })
    }

    /// Deserializes the whole body.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Unknown`](crate::clients::ErrorKind::Unknown)
    /// error if the body does not have the expected shape.
    pub fn json<T: DeserializeOwned>(&self) -> Outcome<T> {
        T::deserialize(&self.body).map_err(|e| {
            tracing::debug!("Response body has unexpected shape: {}", e);
            ApiError::malformed(MALFORMED_BODY)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: u64,
        name: String,
    }

    #[test]
    fn test_field_extracts_typed_record() {
        let response = HttpResponse::new(
            200,
            json!({"product": {"id": 7, "name": "Pump"}}),
        );

        let named: Named = response.field("product").unwrap();
        assert_eq!(
            named,
            Named {
                id: 7,
                name: "Pump".to_string()
            }
        );
    }

    #[test]
    fn test_field_missing_is_malformed() {
        let response = HttpResponse::new(200, json!({}));
        let error = response.field::<Named>("product").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert_eq!(error.message, "malformed response body");
    }

    #[test]
    fn test_field_wrong_type_is_malformed() {
        let response = HttpResponse::new(
            200,
            json!({"product": {"id": "seven", "name": "Pump"}}),
        );
        let error = response.field::<Named>("product").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_json_reads_whole_body() {
        let response = HttpResponse::new(200, json!({"id": 1, "name": "A"}));
        let named: Named = response.json().unwrap();
        assert_eq!(named.id, 1);
    }
}
