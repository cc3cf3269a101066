//! Nested per-leaf serializer
//!
//! Walks a JSON-like structure and encrypts every string leaf (map keys
//! included) as an independent envelope token, then CBOR-encodes the rebuilt
//! structure as an unencrypted outer layer. Compromising one leaf token
//! reveals only that leaf; the cost is one token per leaf.
//!
//! Only string leaves are encryptable. Numbers, booleans and nulls pass
//! through unchanged, so a decrypted leaf is always a UTF-8 string.

use ciborium::de::Error as CborDeError;
use serde_json::{Map, Value};

use crate::crypto::EnvelopeCryptor;
use crate::error::{SealboxError, SealboxResult};

use super::Serializer;

/// Maximum traversal depth for nested structures
///
/// Bounds stack use on attacker-supplied deeply nested input.
const MAX_DEPTH: usize = 64;

/// Serializer that encrypts each string leaf independently
pub struct NestedSerializer {
    cryptor: EnvelopeCryptor,
}

impl NestedSerializer {
    pub fn new(cryptor: EnvelopeCryptor) -> Self {
        Self { cryptor }
    }

    /// Rebuild the structure with every string leaf replaced by a token
    fn seal_value(&self, value: &Value, password: &str, depth: usize) -> SealboxResult<Value> {
        if depth > MAX_DEPTH {
            return Err(SealboxError::CyclicStructure { depth });
        }

        match value {
            Value::String(leaf) => {
                let token = self.cryptor.encrypt(leaf.as_bytes(), password)?;
                Ok(Value::String(token))
            }
            Value::Array(items) => {
                let sealed = items
                    .iter()
                    .map(|item| self.seal_value(item, password, depth + 1))
                    .collect::<SealboxResult<Vec<_>>>()?;
                Ok(Value::Array(sealed))
            }
            Value::Object(map) => {
                let mut sealed = Map::with_capacity(map.len());
                for (key, item) in map {
                    let sealed_key = self.cryptor.encrypt(key.as_bytes(), password)?;
                    sealed.insert(sealed_key, self.seal_value(item, password, depth + 1)?);
                }
                Ok(Value::Object(sealed))
            }
            other => Ok(other.clone()),
        }
    }

    /// Inverse of `seal_value`: decrypt every string leaf back
    fn open_value(&self, value: &Value, password: &str, depth: usize) -> SealboxResult<Value> {
        if depth > MAX_DEPTH {
            return Err(SealboxError::CyclicStructure { depth });
        }

        match value {
            Value::String(token) => Ok(Value::String(self.open_leaf(token, password)?)),
            Value::Array(items) => {
                let opened = items
                    .iter()
                    .map(|item| self.open_value(item, password, depth + 1))
                    .collect::<SealboxResult<Vec<_>>>()?;
                Ok(Value::Array(opened))
            }
            Value::Object(map) => {
                let mut opened = Map::with_capacity(map.len());
                for (key, item) in map {
                    let opened_key = self.open_leaf(key, password)?;
                    opened.insert(opened_key, self.open_value(item, password, depth + 1)?);
                }
                Ok(Value::Object(opened))
            }
            other => Ok(other.clone()),
        }
    }

    fn open_leaf(&self, token: &str, password: &str) -> SealboxResult<String> {
        let plaintext = self.cryptor.decrypt(token, password)?;
        String::from_utf8(plaintext)
            .map_err(|e| SealboxError::Decode(format!("leaf is not valid UTF-8: {}", e)))
    }
}

impl Serializer for NestedSerializer {
    fn cryptor(&self) -> &EnvelopeCryptor {
        &self.cryptor
    }

    fn encode(&self, value: &Value, password: &str) -> SealboxResult<Vec<u8>> {
        let sealed = self.seal_value(value, password, 0)?;
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&sealed, &mut buf)
            .map_err(|e| SealboxError::Serialization(format!("CBOR encoding failed: {}", e)))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8], password: &str) -> SealboxResult<Value> {
        let sealed: Value = ciborium::de::from_reader(bytes).map_err(|e| match e {
            CborDeError::Semantic(_, msg) => SealboxError::UnsupportedType(format!(
                "CBOR stream contains an unrepresentable construct: {}",
                msg
            )),
            other => SealboxError::Decode(format!("invalid CBOR: {}", other)),
        })?;
        self.open_value(&sealed, password, 0)
    }

    /// Per-leaf encryption happens inside `encode`; the CBOR outer layer is
    /// not wrapped in a second envelope.
    fn serialize(&self, value: &Value, password: &str) -> SealboxResult<Vec<u8>> {
        self.encode(value, password)
    }

    fn deserialize(&self, data: &[u8], password: &str) -> SealboxResult<Value> {
        self.decode(data, password)
    }
}
