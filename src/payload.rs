//! Lenient-but-structural JSON decoding shared by both upstream parsers.
//!
//! Upstream replies are decoded field by field with these rules:
//! - a struct position accepts an object or `null` (zero value), nothing else;
//! - a list position accepts an array or `null` (empty), and each element
//!   follows the struct rule;
//! - scalar members accept their own type or `null` (zero value);
//! - missing and unknown members are ignored.

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn object_value<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned + Default,
    E: serde::de::Error,
{
    match value {
        Value::Null => Ok(T::default()),
        Value::Object(_) => T::deserialize(value).map_err(E::custom),
        other => Err(E::invalid_type(unexpected(&other), &"an object or null")),
    }
}

/// Decode a whole body that must be a JSON object (or `null`)
pub fn decode_object<T>(body: &[u8]) -> serde_json::Result<T>
where
    T: DeserializeOwned + Default,
{
    let value: Value = serde_json::from_slice(body)?;
    object_value(value)
}

/// `deserialize_with` helper for nested struct members
pub fn object_or_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    object_value(Value::deserialize(deserializer)?)
}

/// `deserialize_with` helper for lists of structs
pub fn objects_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(object_value::<T, D::Error>)
            .collect(),
        other => Err(D::Error::invalid_type(unexpected(&other), &"an array or null")),
    }
}

/// `deserialize_with` helper for scalar members where `null` means zero value
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Inner {
        #[serde(default, deserialize_with = "or_default")]
        name: String,
        #[serde(default, deserialize_with = "or_default")]
        id: i64,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "object_or_null")]
        inner: Inner,
        #[serde(default, deserialize_with = "objects_or_null")]
        items: Vec<Inner>,
    }

    #[test]
    fn test_decode_object_accepts_object_and_null() {
        assert_eq!(decode_object::<Outer>(b"{}").unwrap(), Outer::default());
        assert_eq!(decode_object::<Outer>(b"null").unwrap(), Outer::default());
    }

    #[test]
    fn test_decode_object_rejects_non_objects() {
        for body in ["[]", "[{}]", "42", "\"str\"", "true", "", "not json"] {
            assert!(decode_object::<Outer>(body.as_bytes()).is_err(), "body: {}", body);
        }
    }

    #[test]
    fn test_null_members_become_zero_values() {
        let body = r#"{"inner": null, "items": [null, {"name": null, "id": null}, {"name": "x", "id": 3}]}"#;

        let outer = decode_object::<Outer>(body.as_bytes()).unwrap();
        assert_eq!(outer.inner, Inner::default());
        assert_eq!(
            outer.items,
            vec![
                Inner::default(),
                Inner::default(),
                Inner {
                    name: "x".to_string(),
                    id: 3
                },
            ]
        );
    }

    #[test]
    fn test_nested_arrays_are_rejected() {
        for body in [r#"{"inner": []}"#, r#"{"items": [[]]}"#, r#"{"items": {}}"#, r#"{"inner": "x"}"#] {
            assert!(decode_object::<Outer>(body.as_bytes()).is_err(), "body: {}", body);
        }
    }

    #[test]
    fn test_scalar_type_mismatch_is_rejected() {
        assert!(decode_object::<Outer>(br#"{"inner": {"name": 5}}"#).is_err());
        assert!(decode_object::<Outer>(br#"{"inner": {"id": "5"}}"#).is_err());
    }
}
