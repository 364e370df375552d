//! Conversion between raw JSON bodies and typed records.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Decode a response body into a typed record.
///
/// Never fails: a body that is not a JSON object decodes to `T::default()`,
/// and every field of the response types falls back to its default on its own.
#[must_use]
pub fn decode<T: DeserializeOwned + Default>(raw: &Value) -> T {
    if !raw.is_object() {
        return T::default();
    }
    T::deserialize(raw).unwrap_or_default()
}

/// Encode a request payload into its wire JSON.
///
/// Object keys keep the declaration order of the payload's fields.
///
/// # Errors
///
/// Returns an error if the payload cannot be represented as JSON.
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

/// Interpret a wire timestamp (unix seconds). Zero and negative values mean "unset".
#[must_use]
pub fn timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseResult, LoginRequest, LoginResponse};
    use serde_json::json;

    #[test]
    fn non_object_bodies_decode_to_defaults() {
        for raw in [json!(null), json!([]), json!("ok"), json!(12)] {
            let result: BaseResult = decode(&raw);
            assert_eq!(result, BaseResult::default());
        }
    }

    #[test]
    fn timestamps() {
        assert_eq!(timestamp(0), None);
        assert_eq!(timestamp(-5), None);
        assert_eq!(
            timestamp(1_700_000_000).unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn decode_is_repeatable() {
        let raw = json!({
            "success": true,
            "auth_token": "abc",
            "user": {"name": "Joe"},
            "credit_cards": [{"cc_token": "t1"}, null, {}]
        });
        let first: LoginResponse = decode(&raw);
        let second: LoginResponse = decode(&raw);
        assert_eq!(first, second);
    }

    #[test]
    fn encode_keeps_field_order() {
        let request = LoginRequest::new("a@b.ie", "hash", "device");
        let encoded = encode(&request).unwrap();
        let keys: Vec<&str> = encoded
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["email", "password", "device_token"]);
        assert_eq!(
            serde_json::to_string(&encoded).unwrap(),
            r#"{"email":"a@b.ie","password":"hash","device_token":"device"}"#
        );
    }
}
