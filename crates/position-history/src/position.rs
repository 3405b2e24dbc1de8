//! Position lookup within a parsed portfolio document

use serde_json::Value;

/// The document has no `positions` array to search
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionsError {
    /// The top-level value has no `positions` key
    #[error("document has no \"positions\" field")]
    Missing,
    /// `positions` exists but is not an array
    #[error("\"positions\" has type {0}, expected an array")]
    NotAnArray(&'static str),
}

/// A matched position's value fields, copied verbatim from the document
#[derive(Debug, Clone, PartialEq)]
pub struct PositionValues {
    /// `marketValue`, if present
    pub market_value: Option<Value>,
    /// `costBasis`, if present
    pub cost_basis: Option<Value>,
}

impl PositionValues {
    /// Whether the market value would be truthy in JavaScript
    #[must_use]
    pub fn has_market_value(&self) -> bool {
        self.market_value.as_ref().is_some_and(is_truthy)
    }
}

/// Find the first entry of `document.positions` whose `symbol` equals `symbol`
///
/// Entries that are not objects, or whose `symbol` is not a string, never
/// match.
///
/// # Errors
///
/// Returns `PositionsError` if `positions` is absent or not an array.
pub fn find_position(
    document: &Value,
    symbol: &str,
) -> Result<Option<PositionValues>, PositionsError> {
    let positions = match document.get("positions") {
        None => return Err(PositionsError::Missing),
        Some(Value::Array(positions)) => positions,
        Some(other) => return Err(PositionsError::NotAnArray(kind(other))),
    };

    Ok(positions
        .iter()
        .filter_map(Value::as_object)
        .find(|entry| entry.get("symbol").and_then(Value::as_str) == Some(symbol))
        .map(|entry| PositionValues {
            market_value: entry.get("marketValue").cloned(),
            cost_basis: entry.get("costBasis").cloned(),
        }))
}

/// JavaScript truthiness of a JSON value
///
/// `null`, `false`, `0`, `-0` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
