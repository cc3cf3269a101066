//! Binary serializer
//!
//! Encodes values as self-describing CBOR. Unlike a language-native object
//! dump, CBOR is a schema'd format that is safe to decode from self-produced
//! tokens; streams containing constructs with no JSON mapping are rejected
//! rather than guessed at.

use ciborium::de::Error as CborDeError;
use serde_json::Value;

use crate::crypto::EnvelopeCryptor;
use crate::error::{SealboxError, SealboxResult};

use super::Serializer;

/// Serializer for opaque binary round-trips via CBOR
pub struct BinarySerializer {
    cryptor: EnvelopeCryptor,
}

impl BinarySerializer {
    pub fn new(cryptor: EnvelopeCryptor) -> Self {
        Self { cryptor }
    }
}

impl Serializer for BinarySerializer {
    fn cryptor(&self) -> &EnvelopeCryptor {
        &self.cryptor
    }

    fn encode(&self, value: &Value, _password: &str) -> SealboxResult<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(value, &mut buf)
            .map_err(|e| SealboxError::Serialization(format!("CBOR encoding failed: {}", e)))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8], _password: &str) -> SealboxResult<Value> {
        ciborium::de::from_reader(bytes).map_err(|e| match e {
            CborDeError::Semantic(_, msg) => SealboxError::UnsupportedType(format!(
                "CBOR stream contains an unrepresentable construct: {}",
                msg
            )),
            other => SealboxError::Decode(format!("invalid CBOR: {}", other)),
        })
    }
}
