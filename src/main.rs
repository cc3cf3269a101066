use anyhow::Result;
use clap::{Parser, Subcommand};

use sealbox::cli::{handle_decrypt_command, handle_encrypt_command, DecryptArgs, EncryptArgs};

#[derive(Parser)]
#[command(
    name = "sealbox",
    version,
    about = "Password-protected token encryption with pluggable serializers",
    long_about = "sealbox encrypts a payload into a self-contained token using a \
                  password-derived key. The salt and PBKDF2 iteration count travel \
                  inside the token, so decrypting needs only the password."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a password-protected token
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Decrypt a token file back into its payload
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt(args) => handle_encrypt_command(args)?,
        Commands::Decrypt(args) => handle_decrypt_command(args)?,
    }

    Ok(())
}
