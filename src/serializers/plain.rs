//! Plain-text serializer
//!
//! Encodes a string value as its UTF-8 bytes. The simplest variant.

use serde_json::Value;

use crate::crypto::EnvelopeCryptor;
use crate::error::{SealboxError, SealboxResult};

use super::Serializer;

/// Serializer for plain UTF-8 text
pub struct PlainSerializer {
    cryptor: EnvelopeCryptor,
}

impl PlainSerializer {
    pub fn new(cryptor: EnvelopeCryptor) -> Self {
        Self { cryptor }
    }
}

impl Serializer for PlainSerializer {
    fn cryptor(&self) -> &EnvelopeCryptor {
        &self.cryptor
    }

    fn encode(&self, value: &Value, _password: &str) -> SealboxResult<Vec<u8>> {
        match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(SealboxError::UnsupportedType(format!(
                "plain serializer takes a string, got {}",
                type_name(other)
            ))),
        }
    }

    fn decode(&self, bytes: &[u8], _password: &str) -> SealboxResult<Value> {
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| SealboxError::Decode(format!("plaintext is not valid UTF-8: {}", e)))?;
        Ok(Value::String(text))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> PlainSerializer {
        PlainSerializer::new(EnvelopeCryptor::new().with_iterations(1_000))
    }

    #[test]
    fn test_roundtrip() {
        let serializer = plain();
        let value = Value::String("hello world".to_string());

        let token = serializer.serialize(&value, "pw123").unwrap();
        assert_eq!(serializer.deserialize(&token, "pw123").unwrap(), value);
    }

    #[test]
    fn test_wrong_password_fails() {
        let serializer = plain();
        let value = Value::String("hello world".to_string());

        let token = serializer.serialize(&value, "pw123").unwrap();
        let err = serializer.deserialize(&token, "wrong").unwrap_err();
        assert!(err.is_authentication_failed());
    }

    #[test]
    fn test_non_string_rejected() {
        let serializer = plain();
        let err = serializer.encode(&serde_json::json!(42), "pw").unwrap_err();
        assert!(matches!(err, SealboxError::UnsupportedType(_)));
    }

    #[test]
    fn test_unicode_text() {
        let serializer = plain();
        let value = Value::String("пароль 🔐".to_string());

        let token = serializer.serialize(&value, "pw").unwrap();
        assert_eq!(serializer.deserialize(&token, "pw").unwrap(), value);
    }

    #[test]
    fn test_invalid_utf8_decode_fails() {
        let serializer = plain();
        let err = serializer.decode(&[0xff, 0xfe], "pw").unwrap_err();
        assert!(matches!(err, SealboxError::Decode(_)));
    }
}
