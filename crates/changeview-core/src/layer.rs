//! Raw layer coercion and the first-match-wins scan.
//!
//! A *layer* is one raw JSON fragment — an object, or a string containing
//! JSON — believed to describe all or part of a single change. Several
//! layers may be redundant. Everything here is defensive: a string that is
//! not valid JSON, or a JSON value of the wrong shape, is treated as
//! *absent* (`None`), never as an error. Parse fallbacks are logged at
//! `debug` level so malformed payloads stay observable.

use serde_json::{Map, Value};

/// Parse a string as JSON, treating failure as absence.
pub fn parse_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(
                event = changeview_core_types::schema::EVENT_PARSE_FALLBACK,
                error = %err,
                "discarding unparsable JSON fragment"
            );
            None
        }
    }
}

/// Coerce a value to a JSON object map.
///
/// Accepts an object directly, or a string that parses to an object.
/// Null, arrays, scalars, and unparsable strings coerce to `None`.
pub fn coerce_record(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match parse_json(text) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a value to a JSON array.
///
/// Accepts an array directly, or a string that parses to an array.
/// Everything else coerces to `None`.
pub fn coerce_array(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(text) => match parse_json(text) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Read a value as a trimmed, non-empty string.
///
/// Numbers and booleans stringify; empty or whitespace-only strings and
/// all other shapes yield `None`.
pub fn non_empty_str(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scan layers in order and return the first non-empty extraction.
///
/// This is the single precedence rule shared by snapshot lookup and
/// menu-change extraction: once one layer yields a result, every later
/// layer is ignored. Layers that do not coerce to an object are skipped.
pub fn first_non_empty<T, F>(layers: &[Value], extract: F) -> Option<T>
where
    F: Fn(&Map<String, Value>) -> Option<T>,
{
    layers
        .iter()
        .filter_map(coerce_record)
        .find_map(|record| extract(&record))
}
