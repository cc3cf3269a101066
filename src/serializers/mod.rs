//! Serializer variants for sealbox
//!
//! Each variant pairs a domain-value encoding with the shared encryption
//! envelope. The trait's default `serialize`/`deserialize` compose
//! `encode`/`decode` with the [`EnvelopeCryptor`]; the nested variant
//! overrides them because its encryption happens per leaf inside `encode`.

pub mod binary;
pub mod json;
pub mod nested;
pub mod plain;

use std::str::FromStr;

use serde_json::Value;

use crate::crypto::EnvelopeCryptor;
use crate::error::{SealboxError, SealboxResult};

pub use binary::BinarySerializer;
pub use json::JsonSerializer;
pub use nested::NestedSerializer;
pub use plain::PlainSerializer;

/// A strategy turning a typed value into protected bytes and back
///
/// All implementations are stateless between calls; `serialize` and
/// `deserialize` calls may run concurrently without coordination.
pub trait Serializer {
    /// The envelope cryptor this variant protects its payloads with
    fn cryptor(&self) -> &EnvelopeCryptor;

    /// Encode a value into bytes, without envelope encryption
    ///
    /// Only the nested variant consumes the password here; the others
    /// ignore it and encode deterministically.
    fn encode(&self, value: &Value, password: &str) -> SealboxResult<Vec<u8>>;

    /// Decode bytes back into a value, the inverse of `encode`
    fn decode(&self, bytes: &[u8], password: &str) -> SealboxResult<Value>;

    /// Encode, then encrypt into a token (returned as ASCII bytes)
    fn serialize(&self, value: &Value, password: &str) -> SealboxResult<Vec<u8>> {
        let encoded = self.encode(value, password)?;
        let token = self.cryptor().encrypt(&encoded, password)?;
        Ok(token.into_bytes())
    }

    /// Decrypt a token, then decode the plaintext back into a value
    fn deserialize(&self, data: &[u8], password: &str) -> SealboxResult<Value> {
        let token = std::str::from_utf8(data)
            .map_err(|_| SealboxError::MalformedToken("token is not valid UTF-8".to_string()))?;
        let plaintext = self.cryptor().decrypt(token, password)?;
        self.decode(&plaintext, password)
    }
}

/// The serializer variants sealbox supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerKind {
    /// UTF-8 text payloads
    Plain,
    /// JSON-like mappings and sequences of primitives
    Json,
    /// Self-describing CBOR for opaque binary round-trips
    Binary,
    /// Per-leaf encryption of nested structures
    Nested,
}

impl SerializerKind {
    /// All known variant names, for diagnostics
    pub const NAMES: [&'static str; 4] = ["plain", "json", "binary", "nested"];

    /// Canonical name of this variant
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Json => "json",
            Self::Binary => "binary",
            Self::Nested => "nested",
        }
    }
}

impl FromStr for SerializerKind {
    type Err = SealboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "binary" => Ok(Self::Binary),
            "nested" => Ok(Self::Nested),
            other => Err(SealboxError::UndefinedSerializer {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SerializerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the serializer for a variant, sharing one cryptor configuration
pub fn serializer_for(kind: SerializerKind, cryptor: EnvelopeCryptor) -> Box<dyn Serializer> {
    match kind {
        SerializerKind::Plain => Box::new(PlainSerializer::new(cryptor)),
        SerializerKind::Json => Box::new(JsonSerializer::new(cryptor)),
        SerializerKind::Binary => Box::new(BinarySerializer::new(cryptor)),
        SerializerKind::Nested => Box::new(NestedSerializer::new(cryptor)),
    }
}
