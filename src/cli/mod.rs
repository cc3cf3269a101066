//! CLI command handlers
//!
//! Bridges clap argument parsing with the serializer and envelope layers.

pub mod crypt;

pub use crypt::{handle_decrypt_command, handle_encrypt_command, DecryptArgs, EncryptArgs};
