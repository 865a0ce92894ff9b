// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Reads a numeric field.
///
/// Numbers and numeric strings (as typed into a number input) are
/// accepted. Anything else, including non-finite values, reads as `None`.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Returns whether a field counts as unfilled.
#[must_use]
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// Decodes a reference object held in the tree.
///
/// Blank or mis-shaped values decode as `None`.
#[must_use]
pub fn reference<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value
        .filter(|v| !is_blank(Some(v)))
        .and_then(|v| T::deserialize(v).ok())
}

/// Encodes a value for the tree.
#[must_use]
pub fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Encodes a number, mapping non-finite values to null.
#[must_use]
pub fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Encodes optional text, mapping `None` to null.
#[must_use]
pub fn text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}
