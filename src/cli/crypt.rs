//! Encrypt/decrypt CLI commands
//!
//! Runs the read -> (de)serialize -> write pipeline. The serializer name is
//! resolved here so unknown names surface `UndefinedSerializer` with the
//! offending name, and the password is prompted for when not supplied.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use serde_json::Value;

use crate::crypto::{EnvelopeCryptor, SecureString};
use crate::error::{SealboxError, SealboxResult};
use crate::serializers::{serializer_for, SerializerKind};
use crate::storage::{read_bytes, write_bytes_atomic};

/// Arguments for the encrypt command
#[derive(Args)]
pub struct EncryptArgs {
    /// Serializer variant: plain, json, binary, or nested
    #[arg(short, long, default_value = "plain")]
    pub serializer: String,

    /// Input file to encrypt
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination file for the token
    #[arg(short, long)]
    pub output: PathBuf,

    /// Password (prompted if not given)
    #[arg(short, long, env = "SEALBOX_PASSWORD")]
    pub password: Option<String>,

    /// Override the PBKDF2 iteration count for new tokens
    #[arg(long)]
    pub iterations: Option<u32>,
}

/// Arguments for the decrypt command
#[derive(Args)]
pub struct DecryptArgs {
    /// Serializer variant: plain, json, binary, or nested
    #[arg(short, long, default_value = "plain")]
    pub serializer: String,

    /// Token file to decrypt
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination file for the recovered payload
    #[arg(short, long)]
    pub output: PathBuf,

    /// Password (prompted if not given)
    #[arg(short, long, env = "SEALBOX_PASSWORD")]
    pub password: Option<String>,

    /// Reject tokens older than this many seconds
    #[arg(long)]
    pub ttl: Option<u64>,
}

/// Handle the encrypt command
pub fn handle_encrypt_command(args: EncryptArgs) -> SealboxResult<()> {
    let kind: SerializerKind = args.serializer.parse()?;
    let password = resolve_password(args.password)?;

    let data = read_bytes(&args.input)?;
    if data.is_empty() {
        return Err(SealboxError::Serialization(format!(
            "nothing to encrypt: {} is empty",
            args.input.display()
        )));
    }

    let value = parse_input(kind, &data)?;

    let mut cryptor = EnvelopeCryptor::new();
    if let Some(iterations) = args.iterations {
        cryptor = cryptor.with_iterations(iterations);
    }

    let serialized = serializer_for(kind, cryptor).serialize(&value, password.as_str())?;
    write_bytes_atomic(&args.output, &serialized)?;

    println!(
        "Encrypted {} -> {} ({} serializer)",
        args.input.display(),
        args.output.display(),
        kind
    );
    Ok(())
}

/// Handle the decrypt command
pub fn handle_decrypt_command(args: DecryptArgs) -> SealboxResult<()> {
    let kind: SerializerKind = args.serializer.parse()?;
    let password = resolve_password(args.password)?;

    let data = read_bytes(&args.input)?;
    if data.is_empty() {
        return Err(SealboxError::Deserialization(format!(
            "nothing to decrypt: {} is empty",
            args.input.display()
        )));
    }

    let mut cryptor = EnvelopeCryptor::new();
    if let Some(ttl_secs) = args.ttl {
        cryptor = cryptor.with_ttl(Duration::from_secs(ttl_secs));
    }

    let value = serializer_for(kind, cryptor).deserialize(&data, password.as_str())?;
    write_bytes_atomic(&args.output, &render_output(kind, &value)?)?;

    println!(
        "Decrypted {} -> {} ({} serializer)",
        args.input.display(),
        args.output.display(),
        kind
    );
    Ok(())
}

/// Turn raw input bytes into the domain value the variant expects
fn parse_input(kind: SerializerKind, data: &[u8]) -> SealboxResult<Value> {
    match kind {
        SerializerKind::Plain => {
            let text = String::from_utf8(data.to_vec()).map_err(|e| {
                SealboxError::Serialization(format!("input is not valid UTF-8 text: {}", e))
            })?;
            Ok(Value::String(text))
        }
        SerializerKind::Json | SerializerKind::Binary | SerializerKind::Nested => {
            serde_json::from_slice(data).map_err(|e| {
                SealboxError::Serialization(format!("input is not valid JSON: {}", e))
            })
        }
    }
}

/// Render a recovered value as output bytes
fn render_output(kind: SerializerKind, value: &Value) -> SealboxResult<Vec<u8>> {
    match (kind, value) {
        (SerializerKind::Plain, Value::String(text)) => Ok(text.as_bytes().to_vec()),
        _ => serde_json::to_vec_pretty(value)
            .map_err(|e| SealboxError::Deserialization(format!("JSON rendering failed: {}", e))),
    }
}

fn resolve_password(password: Option<String>) -> SealboxResult<SecureString> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| SealboxError::Io(format!("Failed to read password: {}", e)))?,
    };

    if password.is_empty() {
        return Err(SealboxError::Serialization(
            "password must not be empty".to_string(),
        ));
    }

    Ok(SecureString::new(password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_input() {
        let value = parse_input(SerializerKind::Plain, b"hello").unwrap();
        assert_eq!(value, json!("hello"));
    }

    #[test]
    fn test_parse_json_input() {
        let value = parse_input(SerializerKind::Json, br#"{"a": 1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_invalid_json_input() {
        let err = parse_input(SerializerKind::Nested, b"{oops").unwrap_err();
        assert!(matches!(err, SealboxError::Serialization(_)));
    }

    #[test]
    fn test_render_plain_output_is_raw_text() {
        let out = render_output(SerializerKind::Plain, &json!("hello")).unwrap();
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_render_structured_output_is_json() {
        let out = render_output(SerializerKind::Json, &json!({"a": 1})).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!({"a": 1}));
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = resolve_password(Some(String::new())).unwrap_err();
        assert!(matches!(err, SealboxError::Serialization(_)));
    }
}
