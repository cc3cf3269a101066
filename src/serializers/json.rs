//! JSON serializer
//!
//! Encodes a JSON-like mapping/sequence of primitives as compact JSON text
//! before the whole payload is encrypted once.

use serde_json::Value;

use crate::crypto::EnvelopeCryptor;
use crate::error::{SealboxError, SealboxResult};

use super::Serializer;

/// Serializer for JSON-like structured values
pub struct JsonSerializer {
    cryptor: EnvelopeCryptor,
}

impl JsonSerializer {
    pub fn new(cryptor: EnvelopeCryptor) -> Self {
        Self { cryptor }
    }
}

impl Serializer for JsonSerializer {
    fn cryptor(&self) -> &EnvelopeCryptor {
        &self.cryptor
    }

    fn encode(&self, value: &Value, _password: &str) -> SealboxResult<Vec<u8>> {
        serde_json::to_vec(value)
            .map_err(|e| SealboxError::Serialization(format!("JSON encoding failed: {}", e)))
    }

    fn decode(&self, bytes: &[u8], _password: &str) -> SealboxResult<Value> {
        serde_json::from_slice(bytes)
            .map_err(|e| SealboxError::Decode(format!("invalid JSON: {}", e)))
    }
}
