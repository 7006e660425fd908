//! Key derivation helpers using HKDF-SHA256.
//!
//! The Argon2id output is the master key.  The key that actually seals
//! the vault document is expanded from it with a fixed context string,
//! so the raw Argon2 output is never handed to the cipher.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, ShelterError};

use super::kdf::KEY_LEN;

/// HKDF `info` for the document encryption key.
const DOCUMENT_KEY_INFO: &[u8] = b"pwshelter-document-key";

/// Derive the document encryption key from the master key.
pub fn derive_document_key(master_key: &[u8]) -> Result<[u8; KEY_LEN]> {
    hkdf_derive(master_key, DOCUMENT_KEY_INFO)
}

/// Run HKDF-SHA256 expand with the given `info`.
///
/// The extract step uses a zero salt; the master key already has high
/// entropy (it came from Argon2id).
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| ShelterError::CipherFault(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the document encryption key from this master key.
    pub fn derive_document_key(&self) -> Result<[u8; KEY_LEN]> {
        derive_document_key(&self.bytes)
    }
}
