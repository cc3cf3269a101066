//! Cryptographic core for sealbox
//!
//! Provides AES-256-GCM authenticated encryption with PBKDF2-HMAC-SHA256
//! key derivation, wrapped in a self-describing password envelope.

pub mod cipher;
pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use envelope::EnvelopeCryptor;
pub use key_derivation::{derive_key, DerivedKey, DEFAULT_ITERATIONS, SALT_LEN};
pub use secure_memory::SecureString;
