pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod storage;
pub mod vault;

pub use crypto::{AesGcmCipher, Cipher};
pub use errors::{Result, ShelterError};
pub use storage::{FileStorage, MemoryStorage, Persistence};
pub use vault::CredentialStore;
