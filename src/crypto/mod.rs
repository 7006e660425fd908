//! Cryptographic primitives for pwshelter.
//!
//! This module provides:
//! - The `Cipher` trait and the `AesGcmCipher` envelope (`cipher`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - HKDF-based document key derivation (`keys`)

pub mod cipher;
pub mod encryption;
pub mod kdf;
pub mod keys;

pub use cipher::{AesGcmCipher, Cipher};
pub use kdf::{derive_master_key, generate_salt, Argon2Params};
pub use keys::{derive_document_key, MasterKey};
