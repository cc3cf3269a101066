//! Authenticated encryption primitive
//!
//! AES-256-GCM with a fixed, timestamped header. Layout of a sealed message:
//!
//! | Offset | Size | Field                          |
//! |--------|------|--------------------------------|
//! | 0      | 1    | version (0x01)                 |
//! | 1      | 8    | timestamp (BE u64, unix secs)  |
//! | 9      | 12   | nonce                          |
//! | 21     | N    | ciphertext + 16-byte GCM tag   |
//!
//! The 21-byte header is authenticated as GCM associated data, so tampering
//! with the version or timestamp fails the tag check like any other
//! modification. Every structural or tag failure on open maps to
//! [`SealboxError::AuthenticationFailed`]; callers cannot distinguish a wrong
//! password from a corrupted message.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};

use crate::error::{SealboxError, SealboxResult};

use super::DerivedKey;

/// Current sealed-message version
const VERSION: u8 = 0x01;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Fixed header size: version(1) + timestamp(8) + nonce(12)
const HEADER_SIZE: usize = 1 + 8 + NONCE_SIZE;

/// GCM authentication tag size
const TAG_SIZE: usize = 16;

/// Minimum sealed message: header plus the tag of an empty plaintext
const MIN_SEALED_SIZE: usize = HEADER_SIZE + TAG_SIZE;

/// Accepted clock skew for tokens with timestamps in the future
const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Seal plaintext under a derived key
///
/// Generates a fresh random nonce and stamps the current time. Empty
/// plaintext is valid and produces a tag-only ciphertext.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> SealboxResult<Vec<u8>> {
    seal_at(key, plaintext, unix_now())
}

/// Open a sealed message, optionally enforcing a maximum age
pub fn open(key: &DerivedKey, sealed: &[u8], ttl: Option<Duration>) -> SealboxResult<Vec<u8>> {
    if sealed.len() < MIN_SEALED_SIZE || sealed[0] != VERSION {
        return Err(SealboxError::AuthenticationFailed);
    }

    let header = &sealed[..HEADER_SIZE];
    let nonce = Nonce::from_slice(&sealed[9..HEADER_SIZE]);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SealboxError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: &sealed[HEADER_SIZE..],
                aad: header,
            },
        )
        .map_err(|_| SealboxError::AuthenticationFailed)?;

    // Timestamp is covered by the tag, so it is trustworthy by this point.
    if let Some(ttl) = ttl {
        check_age(timestamp_of(sealed), ttl)?;
    }

    Ok(plaintext)
}

fn seal_at(key: &DerivedKey, plaintext: &[u8], timestamp: u64) -> SealboxResult<Vec<u8>> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let mut header = Vec::with_capacity(HEADER_SIZE);
    header.push(VERSION);
    header.extend_from_slice(&timestamp.to_be_bytes());
    header.extend_from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SealboxError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|e| SealboxError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut sealed = header;
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn timestamp_of(sealed: &[u8]) -> u64 {
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&sealed[1..9]);
    u64::from_be_bytes(ts)
}

fn check_age(timestamp: u64, ttl: Duration) -> SealboxResult<()> {
    let now = unix_now();
    let ttl_secs = ttl.as_secs();

    if timestamp > now + MAX_CLOCK_SKEW_SECS {
        return Err(SealboxError::TokenExpired {
            age_secs: 0,
            ttl_secs,
        });
    }

    let age_secs = now.saturating_sub(timestamp);
    if age_secs > ttl_secs {
        return Err(SealboxError::TokenExpired { age_secs, ttl_secs });
    }

    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::{derive_key, SALT_LEN};

    fn test_key() -> DerivedKey {
        derive_key(b"test_password", &[1u8; SALT_LEN], 1_000).unwrap()
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = test_key();
        let sealed = seal(&key, b"Hello, World!").unwrap();
        let opened = open(&key, &sealed, None).unwrap();
        assert_eq!(opened, b"Hello, World!");
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let sealed = seal(&key, b"").unwrap();
        assert_eq!(sealed.len(), MIN_SEALED_SIZE);
        assert!(open(&key, &sealed, None).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = test_key();
        let other = derive_key(b"other_password", &[1u8; SALT_LEN], 1_000).unwrap();
        let sealed = seal(&key, b"payload").unwrap();
        let err = open(&other, &sealed, None).unwrap_err();
        assert!(err.is_authentication_failed());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key();
        let mut sealed = seal(&key, b"payload").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(open(&key, &sealed, None).unwrap_err().is_authentication_failed());
    }

    #[test]
    fn test_tampered_timestamp_fails() {
        let key = test_key();
        let mut sealed = seal(&key, b"payload").unwrap();
        sealed[5] ^= 0xFF;
        assert!(open(&key, &sealed, None).unwrap_err().is_authentication_failed());
    }

    #[test]
    fn test_wrong_version_fails() {
        let key = test_key();
        let mut sealed = seal(&key, b"payload").unwrap();
        sealed[0] = 0x02;
        assert!(open(&key, &sealed, None).unwrap_err().is_authentication_failed());
    }

    #[test]
    fn test_truncated_fails() {
        let key = test_key();
        let sealed = seal(&key, b"payload").unwrap();
        let err = open(&key, &sealed[..MIN_SEALED_SIZE - 1], None).unwrap_err();
        assert!(err.is_authentication_failed());
    }

    #[test]
    fn test_ttl_fresh_token_passes() {
        let key = test_key();
        let sealed = seal(&key, b"payload").unwrap();
        let opened = open(&key, &sealed, Some(Duration::from_secs(3600))).unwrap();
        assert_eq!(opened, b"payload");
    }

    #[test]
    fn test_ttl_expired_token_fails() {
        let key = test_key();
        let sealed = seal_at(&key, b"payload", unix_now() - 7200).unwrap();
        let err = open(&key, &sealed, Some(Duration::from_secs(3600))).unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_ttl_far_future_token_fails() {
        let key = test_key();
        let sealed = seal_at(&key, b"payload", unix_now() + 7200).unwrap();
        let err = open(&key, &sealed, Some(Duration::from_secs(3600))).unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_no_ttl_ignores_age() {
        let key = test_key();
        let sealed = seal_at(&key, b"payload", unix_now() - 7200).unwrap();
        assert_eq!(open(&key, &sealed, None).unwrap(), b"payload");
    }

    #[test]
    fn test_different_nonces() {
        let key = test_key();
        let sealed1 = seal(&key, b"payload").unwrap();
        let sealed2 = seal(&key, b"payload").unwrap();
        assert_ne!(sealed1[9..HEADER_SIZE], sealed2[9..HEADER_SIZE]);
        assert_ne!(sealed1, sealed2);
    }
}
