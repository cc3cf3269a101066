//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives 256-bit encryption keys from user passwords. The iteration count
//! travels inside every token, so a key can always be re-derived exactly even
//! after the default changes.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SealboxError, SealboxResult};

/// Default PBKDF2 iteration count.
///
/// Callers may override per [`crate::crypto::EnvelopeCryptor`]; whatever value
/// is used is embedded in the token, so raising this later never breaks
/// existing tokens.
pub const DEFAULT_ITERATIONS: u32 = 123_456;

/// Required salt length in bytes
pub const SALT_LEN: usize = 16;

/// A derived 256-bit encryption key
///
/// Zeroed on drop; never printed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; 32],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an encryption key from a password and salt
///
/// Deterministic: the same `(password, salt, iterations)` always yields the
/// same key. The salt must be exactly [`SALT_LEN`] bytes and `iterations`
/// must be at least 1.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> SealboxResult<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(SealboxError::InvalidSalt {
            expected: SALT_LEN,
            got: salt.len(),
        });
    }
    if iterations == 0 {
        return Err(SealboxError::InvalidIterations);
    }

    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    Ok(DerivedKey { key })
}
