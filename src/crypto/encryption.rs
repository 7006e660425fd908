//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.  Both take associated data that is authenticated
//! but not encrypted (the envelope header).
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{Result, ShelterError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`, authenticating `aad` alongside.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ShelterError::CipherFault(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| ShelterError::CipherFault(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt` with the same `aad`.
///
/// Any failure (short input, wrong key, tampered bytes) is `WrongKey`.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN + TAG_LEN {
        return Err(ShelterError::WrongKey);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| ShelterError::WrongKey)?;

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| ShelterError::WrongKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_aad() {
        let key = [0x42u8; 32];
        let sealed = encrypt(&key, b"{}", b"header").unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + 2 + TAG_LEN);
        assert_eq!(decrypt(&key, &sealed, b"header").unwrap(), b"{}");
    }

    #[test]
    fn mismatched_aad_is_rejected() {
        let key = [0x42u8; 32];
        let sealed = encrypt(&key, b"payload", b"header-a").unwrap();
        assert!(matches!(
            decrypt(&key, &sealed, b"header-b"),
            Err(ShelterError::WrongKey)
        ));
    }

    #[test]
    fn short_input_is_rejected() {
        let key = [0x42u8; 32];
        assert!(matches!(
            decrypt(&key, &[0u8; NONCE_LEN], b""),
            Err(ShelterError::WrongKey)
        ));
    }
}
