//! Forgiving `deserialize_with` helpers for loosely-typed upstream JSON.
//!
//! Each helper accepts any JSON value and yields `None` when the value is
//! null or of the wrong type, so one odd field never fails the enclosing
//! struct.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String form of a JSON string or number; `None` for anything else.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a JSON string or number as `Option<String>`.
///
/// # Errors
///
/// Only if the input is not valid JSON at all.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

/// Reads a JSON boolean as `Option<bool>`; other types map to `None`.
///
/// # Errors
///
/// Only if the input is not valid JSON at all.
pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool))
}

/// Reads a nested value as `Option<T>`, mapping a shape mismatch to `None`.
///
/// # Errors
///
/// Only if the input is not valid JSON at all.
pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v).ok()))
}
