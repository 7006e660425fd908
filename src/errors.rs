use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in pwshelter.
#[derive(Debug, Error)]
pub enum ShelterError {
    // --- Cipher errors ---
    #[error("Wrong password or corrupted ciphertext")]
    WrongKey,

    #[error("Cipher fault: {0}")]
    CipherFault(String),

    // --- Vault errors ---
    #[error("Vault content is not a valid document: {0}")]
    Corrupt(String),

    #[error("File already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("File not found at {0}")]
    NotFound(PathBuf),

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    /// Fields: source, account.
    #[error("Unknown account '{1}' in source '{0}'")]
    UnknownAccount(String, String),

    /// Fields: source, account.
    #[error("Account '{1}' already exists in source '{0}'")]
    DuplicateAccount(String, String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Shell errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("No vault selected: use `select <file>` or `create <file>` first")]
    NoVaultSelected,

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

/// Convenience type alias for pwshelter results.
pub type Result<T> = std::result::Result<T, ShelterError>;
