//! The `Cipher` capability and its AES-256-GCM implementation.
//!
//! `AesGcmCipher` produces a self-describing text envelope:
//!
//! ```text
//! base64( [version: 1][memory_kib: u32 LE][iterations: u32 LE][parallelism: u32 LE]
//!         [salt: 32][nonce: 12][ciphertext + tag] )
//! ```
//!
//! The salt is random per encryption and the whole header is bound to the
//! ciphertext as associated data.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, ShelterError};

use super::encryption;
use super::kdf::{self, Argon2Params, SALT_LEN};
use super::keys::MasterKey;

/// Envelope format version.
const ENVELOPE_VERSION: u8 = 1;

/// version + three u32 Argon2 params + salt.
const HEADER_LEN: usize = 1 + 4 * 3 + SALT_LEN;

/// Symmetric, password-keyed encryption of text blobs.
pub trait Cipher {
    /// Encrypt `plaintext` under a key derived from `password`.
    ///
    /// Two calls with the same inputs must produce different output.
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String>;

    /// Decrypt text produced by `encrypt`.
    ///
    /// Fails with `WrongKey` if the password does not match or the
    /// ciphertext is malformed.
    fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String>;
}

/// Argon2id + HKDF + AES-256-GCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmCipher {
    params: Argon2Params,
}

impl AesGcmCipher {
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    fn document_key(password: &str, salt: &[u8], params: &Argon2Params) -> Result<[u8; 32]> {
        let mut master_bytes = kdf::derive_master_key(password.as_bytes(), salt, params)?;
        let master_key = MasterKey::new(master_bytes);
        master_bytes.zeroize();
        master_key.derive_document_key()
    }
}

impl Cipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
        let salt = kdf::generate_salt();
        let header = encode_header(&self.params, &salt);

        let mut key = Self::document_key(password, &salt, &self.params)?;
        let sealed = encryption::encrypt(&key, plaintext.as_bytes(), &header);
        key.zeroize();
        let sealed = sealed?;

        let mut envelope = Vec::with_capacity(HEADER_LEN + sealed.len());
        envelope.extend_from_slice(&header);
        envelope.extend_from_slice(&sealed);
        Ok(BASE64.encode(envelope))
    }

    fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String> {
        let envelope = BASE64
            .decode(ciphertext.trim())
            .map_err(|_| ShelterError::WrongKey)?;
        if envelope.len() < HEADER_LEN {
            return Err(ShelterError::WrongKey);
        }

        let (header, sealed) = envelope.split_at(HEADER_LEN);
        let (params, salt) = decode_header(header)?;

        let mut key = Self::document_key(password, salt, &params)?;
        let plaintext = encryption::decrypt(&key, sealed, header);
        key.zeroize();
        let plaintext = Zeroizing::new(plaintext?);

        String::from_utf8(plaintext.to_vec()).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            ShelterError::WrongKey
        })
    }
}

fn encode_header(params: &Argon2Params, salt: &[u8; SALT_LEN]) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[0] = ENVELOPE_VERSION;
    header[1..5].copy_from_slice(&params.memory_kib.to_le_bytes());
    header[5..9].copy_from_slice(&params.iterations.to_le_bytes());
    header[9..13].copy_from_slice(&params.parallelism.to_le_bytes());
    header[13..].copy_from_slice(salt);
    header
}

fn decode_header(header: &[u8]) -> Result<(Argon2Params, &[u8])> {
    if header[0] != ENVELOPE_VERSION {
        return Err(ShelterError::WrongKey);
    }

    let read_u32 = |at: usize| -> Result<u32> {
        header[at..at + 4]
            .try_into()
            .map(u32::from_le_bytes)
            .map_err(|_| ShelterError::WrongKey)
    };
    let params = Argon2Params {
        memory_kib: read_u32(1)?,
        iterations: read_u32(5)?,
        parallelism: read_u32(9)?,
    };
    if !params.within_decrypt_bounds() {
        return Err(ShelterError::WrongKey);
    }

    Ok((params, &header[13..]))
}
