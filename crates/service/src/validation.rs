//! Presence checks for loosely typed JSON request bodies.
//!
//! A field counts as present when the key exists and its value is not
//! `null`; types and ranges are checked later, when the body is decoded and
//! handed to the service.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ServiceError;

fn first_missing<'a>(obj: &serde_json::Map<String, Value>, fields: &[&'a str]) -> Option<&'a str> {
    fields
        .iter()
        .copied()
        .find(|f| matches!(obj.get(*f), None | Some(Value::Null)))
}

/// Reject the body if any of `fields` is absent or `null`.
pub fn require_fields(body: &Value, fields: &[&str]) -> Result<(), ServiceError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ServiceError::Validation("request body must be a JSON object".into()))?;
    match first_missing(obj, fields) {
        Some(field) => Err(ServiceError::missing_field(field)),
        None => Ok(()),
    }
}

/// Apply [`require_fields`] to every element of the array under `list_key`.
///
/// A missing or non-array `list_key` is left to [`require_fields`] and
/// [`decode`] respectively.
pub fn require_nested_fields(body: &Value, list_key: &str, fields: &[&str]) -> Result<(), ServiceError> {
    let Some(items) = body.get(list_key).and_then(Value::as_array) else { return Ok(()) };
    for (idx, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            ServiceError::Validation(format!("{list_key}[{idx}] must be a JSON object"))
        })?;
        if let Some(field) = first_missing(obj, fields) {
            return Err(ServiceError::missing_field(&format!("{list_key}[{idx}].{field}")));
        }
    }
    Ok(())
}

/// Decode a validated body into its typed form; type mismatches are 400s.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ServiceError> {
    serde_json::from_value(body).map_err(|e| ServiceError::Validation(format!("invalid request body: {e}")))
}
