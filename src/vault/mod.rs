//! Vault module — the encrypted credential store.
//!
//! This module provides:
//! - The decrypted `VaultDocument` hierarchy and name validation (`document`)
//! - `CredentialStore`, the load-mutate-save orchestration (`store`)

pub mod document;
pub mod store;

pub use document::{validate_name, AccountMap, VaultDocument};
pub use store::CredentialStore;
