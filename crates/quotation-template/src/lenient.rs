/*
 * lenient.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fail-open deserialization helpers.
//!
//! Templates arrive mid-edit from the editor surface, so a field holding the
//! wrong type or an unsupported enum value must not reject the whole record.
//! Fields annotated with [`or_default`] take their `Default` value instead.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Styles {
//!     #[serde(default, deserialize_with = "lenient::or_default")]
//!     font_size: FontSize,
//! }
//! ```

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, falling back to `T::default()` if the value is malformed.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value_or_default(value))
}

/// Convert an already-parsed JSON value, falling back to `T::default()`.
pub fn from_value_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    match T::deserialize(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(error = %err, "Malformed field replaced by default");
            T::default()
        }
    }
}

/// Deserialize a list, dropping elements that fail to parse.
///
/// A non-array value yields an empty list.
pub fn vec_skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// Deserialize a number that may also be given as a numeric string.
///
/// Anything else yields `0.0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0.0))
}

/// Like [`number`], but `null`, absent and unparseable values become `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Deserialize an exact decimal amount from a JSON number or numeric string.
///
/// Anything else yields zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value).unwrap_or(Decimal::ZERO))
}

/// Like [`decimal`], but `null`, absent and unparseable values become `None`.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    // JSON numbers are re-read from their shortest text form, so `0.1`
    // stays exactly one tenth.
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}
