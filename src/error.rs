//! Custom error types for sealbox
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for sealbox operations
#[derive(Error, Debug)]
pub enum SealboxError {
    /// Token is structurally invalid: bad base64 or shorter than the
    /// fixed salt + iteration-count header
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Wrong password, wrong iteration count, or tampered ciphertext.
    /// These are deliberately indistinguishable.
    #[error("Authentication failed: wrong password or corrupted token")]
    AuthenticationFailed,

    /// Token age exceeded the configured TTL
    #[error("Token expired: age {age_secs}s exceeds TTL {ttl_secs}s")]
    TokenExpired { age_secs: u64, ttl_secs: u64 },

    /// Salt passed to key derivation has the wrong length
    #[error("Invalid salt length: expected {expected} bytes, got {got}")]
    InvalidSalt { expected: usize, got: usize },

    /// Key derivation requires at least one iteration
    #[error("Invalid iteration count: must be at least 1")]
    InvalidIterations,

    /// Missing or empty input where a value to encrypt was required
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing or empty input where a token to decrypt was required
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Decrypted bytes do not match the expected shape for this variant
    #[error("Decode error: {0}")]
    Decode(String),

    /// Value or byte stream references a type this variant cannot represent
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Nested structure exceeded the recursion limit
    #[error("Nested structure too deep (depth {depth}): possible cycle")]
    CyclicStructure { depth: usize },

    /// Caller requested a serializer variant that doesn't exist
    #[error(
        "Undefined serializer: '{name}' (expected one of: {})",
        crate::serializers::SerializerKind::NAMES.join(", ")
    )]
    UndefinedSerializer { name: String },

    /// File could not be read
    #[error("Failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    /// File I/O errors other than reads
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal cipher setup failures
    #[error("Encryption error: {0}")]
    Encryption(String),
}

impl SealboxError {
    /// Create a file-read error with path context
    pub fn file_read(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is an authentication failure
    pub fn is_authentication_failed(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Check if this is a token-expiry error
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::TokenExpired { .. })
    }
}

/// Convenience result type for sealbox operations
pub type SealboxResult<T> = Result<T, SealboxError>;
