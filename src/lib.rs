//! sealbox - password-protected token encryption with pluggable serializers
//!
//! Turns an arbitrary payload (plain text, JSON-like structured data, or a
//! nested collection of strings) into a password-protected, self-contained
//! token, and recovers the original payload given the same password. Tokens
//! are self-describing: the salt and PBKDF2 iteration count travel inside
//! every token, so decryption needs nothing but the password.
//!
//! # Architecture
//!
//! - `crypto`: key derivation, authenticated encryption, and the token envelope
//! - `serializers`: the encode/decode strategies layered over the envelope
//! - `storage`: file read/write collaborators used by the CLI
//! - `cli`: clap command handlers
//! - `error`: the crate-wide error type
//!
//! # Example
//!
//! ```rust
//! use sealbox::crypto::EnvelopeCryptor;
//!
//! let cryptor = EnvelopeCryptor::new().with_iterations(1_000);
//! let token = cryptor.encrypt(b"hello world", "pw123")?;
//! assert_eq!(cryptor.decrypt(&token, "pw123")?, b"hello world");
//! # Ok::<(), sealbox::SealboxError>(())
//! ```

pub mod cli;
pub mod crypto;
pub mod error;
pub mod serializers;
pub mod storage;

pub use error::{SealboxError, SealboxResult};
