use crate::utils::error::{Result, WrapgenError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Merges caller-supplied `data` into `target`.
///
/// `data` may be a JSON object or a string holding JSON text. Absent, null,
/// empty-object and empty-string data leave `target` untouched.
pub fn normalize_payload<T>(target: T, data: Option<&Value>) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let fields = match data {
        None | Some(Value::Null) => return Ok(target),
        Some(Value::Object(map)) if map.is_empty() => return Ok(target),
        Some(Value::String(text)) if text.is_empty() => return Ok(target),
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            other => {
                return Err(WrapgenError::InvalidPayloadTypeError {
                    found: format!("JSON text holding {}", json_type_name(&other)),
                })
            }
        },
        Some(other) => {
            return Err(WrapgenError::InvalidPayloadTypeError {
                found: json_type_name(other).to_string(),
            })
        }
    };

    let mut merged = match serde_json::to_value(&target)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in fields {
        merged.insert(key, value);
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Converts a JSON object into ordered `(key, value)` pairs for request metadata.
///
/// Non-string values are sent as their JSON text.
pub fn normalize_metadata(metadata: Option<&Value>) -> Result<Vec<(String, String)>> {
    match metadata {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()),
        Some(other) => Err(WrapgenError::InvalidMetadataTypeError {
            found: json_type_name(other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
