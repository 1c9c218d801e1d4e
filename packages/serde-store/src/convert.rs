//! Conversions between scalar Values and serde types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use stephist_store::Value;

use crate::Error;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(Error::Json)
}

/// Convert a Rust type to a Value via serde.
///
/// Fails with [`Error::NotScalar`] if the type serializes to anything but
/// a scalar: history slots hold no structure, the store tree does.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data)?;
    json_to_value(&json)
}

/// Convert a scalar Value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}

/// Convert serde_json::Value to a scalar Value.
pub fn json_to_value(json: &serde_json::Value) -> Result<Value, Error> {
    match json {
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(Error::NotScalar { kind: "number" })
            }
        }
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Null => Err(Error::NotScalar { kind: "null" }),
        serde_json::Value::Array(_) => Err(Error::NotScalar { kind: "array" }),
        serde_json::Value::Object(_) => Err(Error::NotScalar { kind: "object" }),
    }
}
