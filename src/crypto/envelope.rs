//! Password-based encryption envelope
//!
//! A token is `base64url( salt(16) || iterations(4, BE u32) || sealed )`,
//! where `sealed` is the output of [`cipher::seal`]. Salt and iteration count
//! are self-describing: decrypting a token needs only the password, even if
//! the default iteration count has changed since the token was produced.

use std::time::Duration;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::URL_SAFE, Engine};

use crate::error::{SealboxError, SealboxResult};

use super::cipher;
use super::key_derivation::{derive_key, DEFAULT_ITERATIONS, SALT_LEN};

/// Envelope header size: salt(16) + iteration count(4)
const HEADER_SIZE: usize = SALT_LEN + 4;

/// Produces and consumes self-describing password-encrypted tokens
///
/// Stateless apart from configuration; any number of calls may run
/// concurrently. Key material lives only for the duration of a single call.
#[derive(Debug, Clone)]
pub struct EnvelopeCryptor {
    iterations: u32,
    ttl: Option<Duration>,
}

impl Default for EnvelopeCryptor {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            ttl: None,
        }
    }
}

impl EnvelopeCryptor {
    /// Create a cryptor with the default iteration count and no TTL
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the iteration count used for *new* tokens
    ///
    /// Decryption always uses the count embedded in the token.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Reject tokens older than `ttl` on decryption
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Encrypt plaintext into a password-protected token
    ///
    /// Generates a fresh 16-byte salt per call, so encrypting the same
    /// plaintext twice yields different tokens. The result is URL-safe text.
    pub fn encrypt(&self, plaintext: &[u8], password: &str) -> SealboxResult<String> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let key = derive_key(password.as_bytes(), &salt, self.iterations)?;
        let sealed = cipher::seal(&key, plaintext)?;

        let mut raw = Vec::with_capacity(HEADER_SIZE + sealed.len());
        raw.extend_from_slice(&salt);
        raw.extend_from_slice(&self.iterations.to_be_bytes());
        raw.extend_from_slice(&sealed);

        Ok(URL_SAFE.encode(raw))
    }

    /// Decrypt a token back into plaintext
    ///
    /// Fails with [`SealboxError::MalformedToken`] if the token is not valid
    /// base64 or is shorter than the salt + iteration-count header, and with
    /// [`SealboxError::AuthenticationFailed`] on a wrong password or any
    /// tampering.
    pub fn decrypt(&self, token: &str, password: &str) -> SealboxResult<Vec<u8>> {
        let raw = URL_SAFE
            .decode(token.trim())
            .map_err(|e| SealboxError::MalformedToken(format!("invalid base64: {}", e)))?;

        if raw.len() < HEADER_SIZE {
            return Err(SealboxError::MalformedToken(format!(
                "decoded length {} is shorter than the {}-byte header",
                raw.len(),
                HEADER_SIZE
            )));
        }

        let salt = &raw[..SALT_LEN];
        let mut iter_bytes = [0u8; 4];
        iter_bytes.copy_from_slice(&raw[SALT_LEN..HEADER_SIZE]);
        let iterations = u32::from_be_bytes(iter_bytes);

        let key = derive_key(password.as_bytes(), salt, iterations)?;
        cipher::open(&key, &raw[HEADER_SIZE..], self.ttl)
    }
}
