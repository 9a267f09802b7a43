//! Helpers for reading loosely-typed JSON request maps
//!
//! Every helper names the offending field in its error so adapters can
//! report exactly which input was rejected.

use crate::error::{Result, TicketError};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Borrow `value` as an object. `null` reads as an empty map.
pub(crate) fn as_object<'a>(
    what: &str,
    value: &'a Value,
) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(TicketError::validation(
            what,
            format!("expected an object, got {}", type_name(other)),
        )),
    }
}

/// Read an optional string field; `null` counts as absent
pub(crate) fn optional_str(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(expected(key, "a string", other)),
    }
}

/// Read a string field where `null` is meaningful (clearing a link)
///
/// Returns `None` when the key is absent, `Some(None)` for an explicit null.
pub(crate) fn nullable_str(
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<Option<String>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(other) => Err(expected(key, "a string or null", other)),
    }
}

/// Read an optional boolean. The strings `"true"` and `"false"` are accepted.
pub(crate) fn optional_bool(map: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => parse_bool(key, s).map(Some),
        Some(other) => Err(expected(key, "a boolean", other)),
    }
}

/// Read an optional enumeration given by its canonical name
pub(crate) fn optional_enum<T>(map: &Map<String, Value>, key: &str) -> Result<Option<T>>
where
    T: FromStr<Err = TicketError>,
{
    optional_str(map, key)?.map(|s| s.parse()).transpose()
}

pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(TicketError::validation(
            key,
            format!("'{value}' is not a boolean"),
        )),
    }
}

fn expected(key: &str, what: &str, got: &Value) -> TicketError {
    TicketError::validation(key, format!("expected {what}, got {}", type_name(got)))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
