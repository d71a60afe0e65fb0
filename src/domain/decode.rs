//! Strict JSON decoding of tool output into typed records

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{BatteryInfo, DomainError};

/// A record that can be decoded from a tool's JSON payload.
pub trait Schema: DeserializeOwned {
    /// Human-readable name used in parse-failure messages.
    const NAME: &'static str;
}

impl Schema for BatteryInfo {
    const NAME: &'static str = "battery info";
}

/// Decode raw tool output as a single JSON object of schema `T`.
///
/// Malformed JSON, a top-level value that is not an object, or a known field
/// of the wrong type all fail; no partial record is produced. Missing and
/// `null` fields take the schema's defaults and unknown fields are ignored.
pub fn decode<T: Schema>(raw: &[u8]) -> Result<T, DomainError> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| decode_err::<T>(e.to_string()))?;

    if !value.is_object() {
        return Err(decode_err::<T>(format!(
            "expected a JSON object, found {}",
            kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| decode_err::<T>(e.to_string()))
}

fn decode_err<T: Schema>(detail: String) -> DomainError {
    DomainError::Decode {
        schema: T::NAME,
        detail,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
