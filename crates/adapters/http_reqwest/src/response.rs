//! Response conventions of the dashboard backend.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HttpError;

const FALLBACK_REJECTION: &str = "Operation failed";

/// Turn a raw body into JSON.
///
/// An empty body is `null`, a JSON string that itself holds an object or an
/// array is decoded again, and a body that is not JSON at all is kept as a
/// plain string.
pub(crate) fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(body) {
        Ok(Value::String(text)) => match serde_json::from_str::<Value>(&text) {
            Ok(inner @ (Value::Object(_) | Value::Array(_))) => inner,
            _ => Value::String(text),
        },
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}

/// Reject objects carrying an `error` key or `success: false`.
pub(crate) fn check(value: Value) -> Result<Value, HttpError> {
    if let Value::Object(map) = &value {
        if let Some(error) = map.get("error") {
            return Err(HttpError::Rejected(message_of(error)));
        }
        if map.get("success") == Some(&Value::Bool(false)) {
            let message = map
                .get("message")
                .map_or_else(|| FALLBACK_REJECTION.to_string(), message_of);
            return Err(HttpError::Rejected(message));
        }
    }
    Ok(value)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, HttpError> {
    serde_json::from_value(value).map_err(HttpError::Decode)
}

/// Like [`decode`], with `null` standing for the default value.
pub(crate) fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> Result<T, HttpError> {
    if value.is_null() {
        Ok(T::default())
    } else {
        decode(value)
    }
}

#[derive(Deserialize)]
struct Outcome {
    #[serde(default)]
    success: bool,
}

/// For endpoints answering only `{success}`: anything short of
/// `success: true` is a rejection, including an empty or `null` body.
pub(crate) fn require_success(value: Value) -> Result<(), HttpError> {
    let value = check(value)?;
    match serde_json::from_value::<Outcome>(value) {
        Ok(Outcome { success: true }) => Ok(()),
        _ => Err(HttpError::Rejected(FALLBACK_REJECTION.to_string())),
    }
}

fn message_of(value: &Value) -> String {
    match value {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        Value::String(_) | Value::Null | Value::Bool(_) => FALLBACK_REJECTION.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_read_empty_body_as_null() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b" \n"), Value::Null);
    }

    #[test]
    fn should_decode_json_wrapped_in_string_twice() {
        let body = br#""[{\"deviceID\": 3, \"locationID\": 2}]""#;
        assert_eq!(decode_body(body), json!([{"deviceID": 3, "locationID": 2}]));
    }

    #[test]
    fn should_keep_plain_strings() {
        assert_eq!(decode_body(br#""installed""#), json!("installed"));
        assert_eq!(decode_body(b"OK"), json!("OK"));
    }

    #[test]
    fn should_reject_error_key_with_its_message() {
        let err = check(json!({"error": "Name already taken"})).unwrap_err();
        assert!(matches!(err, HttpError::Rejected(message) if message == "Name already taken"));
    }

    #[test]
    fn should_reject_unsuccessful_answers() {
        let err = check(json!({"success": false})).unwrap_err();
        assert!(matches!(err, HttpError::Rejected(message) if message == FALLBACK_REJECTION));
        assert!(check(json!({"success": true, "id": 4})).is_ok());
        assert!(check(json!(["a", "b"])).is_ok());
    }

    #[test]
    fn should_require_explicit_success() {
        assert!(require_success(json!({"success": true})).is_ok());
        for value in [json!({}), Value::Null, json!("OK"), json!({"success": "yes"})] {
            let err = require_success(value).unwrap_err();
            assert!(matches!(err, HttpError::Rejected(message) if message == FALLBACK_REJECTION));
        }
    }

    #[test]
    fn should_default_null_values() {
        let values: Vec<String> = decode_or_default(Value::Null).unwrap();
        assert!(values.is_empty());
        assert!(decode::<Vec<String>>(json!({"a": 1})).is_err());
    }
}
