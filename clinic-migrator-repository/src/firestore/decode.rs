use serde_json::{Map, Number, Value};

use crate::SourceStoreError;

/// Converts one Firestore typed value (`{"stringValue": "x"}`, ...) into JSON.
///
/// Timestamps, references and bytes become strings, integers and doubles
/// become JSON numbers, maps and arrays are decoded recursively.
pub fn decode_value(value: &Value) -> Result<Value, SourceStoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| SourceStoreError::decode(format!("typed value is not an object: {}", value)))?;
    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| SourceStoreError::decode("empty typed value"))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or(false))),
        "integerValue" => decode_integer(inner),
        "doubleValue" => Ok(inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Object(fields))
        }
        other => Err(SourceStoreError::decode(format!("unknown value type {}", other))),
    }
}

/// Decodes a Firestore `fields` map.
pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, SourceStoreError> {
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), decode_value(value)?)))
        .collect()
}

// int64 values travel as strings to avoid precision loss in JSON.
fn decode_integer(inner: &Value) -> Result<Value, SourceStoreError> {
    match inner {
        Value::String(text) => text
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|e| SourceStoreError::decode(format!("integerValue {}: {}", text, e))),
        Value::Number(_) => Ok(inner.clone()),
        other => Err(SourceStoreError::decode(format!("integerValue {}", other))),
    }
}
