//! API response envelopes
//!
//! The inventory backend wraps its answers as:
//! ```json
//! {
//!     "message": "Products fetched",
//!     "data": [ ... ]
//! }
//! ```
//! Some endpoints use `payload` instead of `data`, and a few return the bare
//! array. [`list_items`] accepts all three shapes.

use serde::Deserialize;
use serde_json::Value;

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Extract the list carried by a response body.
///
/// Looks at `data`, then `payload`, then the body itself. Returns `None`
/// when none of them is an array.
pub fn list_items(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("data") {
                return Some(items);
            }
            match map.remove("payload") {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Extract the object carried by a response body (`data` when present,
/// otherwise the body itself).
pub fn data_value(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
