//! Query string serialisation for parameter structs.
//!
//! Parameter structs derive `Serialize` with `skip_serializing_if` on their
//! optional fields. [`serialize_to_query`] flattens them into ordered
//! key/value pairs; `null` values are dropped, so an unset parameter never
//! reaches the wire.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, ErrorKind, Outcome};

/// Serializes a params struct to ordered query pairs.
///
/// Field order follows the struct declaration. Arrays become comma-separated
/// values and nested objects are sent as JSON strings.
///
/// # Errors
///
/// Returns an [`ErrorKind::InvalidRequest`] error if the value cannot be
/// serialized.
pub fn serialize_to_query<T: Serialize>(params: &T) -> Outcome<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(|e| {
        ApiError::new(
            ErrorKind::InvalidRequest,
            format!("Failed to serialize params: {e}"),
        )
    })?;

    let mut query = Vec::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => query.push((key, s)),
                Value::Number(n) => query.push((key, n.to_string())),
                Value::Bool(b) => query.push((key, b.to_string())),
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.push((key, values.join(",")));
                    }
                }
                Value::Object(_) => query.push((key, val.to_string())),
            }
        }
    }

    Ok(query)
}
