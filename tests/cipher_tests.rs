//! Integration tests for the pwshelter cipher.

use pwshelter::crypto::kdf::MIN_MEMORY_KIB;
use pwshelter::crypto::{AesGcmCipher, Argon2Params, Cipher};
use pwshelter::ShelterError;

/// Cheap Argon2 parameters so the suite stays fast.
fn cipher() -> AesGcmCipher {
    AesGcmCipher::new(Argon2Params {
        memory_kib: MIN_MEMORY_KIB,
        iterations: 1,
        parallelism: 1,
    })
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let plaintext = r#"{"gmail":{"alice":"secret1"}}"#;
    let ciphertext = cipher().encrypt(plaintext, "m1").expect("encrypt");

    assert!(!ciphertext.contains("secret1"));
    assert_eq!(cipher().decrypt(&ciphertext, "m1").expect("decrypt"), plaintext);
}

#[test]
fn roundtrip_handles_empty_and_unicode() {
    for (plaintext, password) in [("", "pw"), ("{}", ""), ("пароль ✓ 密码", "ключ")] {
        let ciphertext = cipher().encrypt(plaintext, password).unwrap();
        assert_eq!(cipher().decrypt(&ciphertext, password).unwrap(), plaintext);
    }
}

#[test]
fn ciphertext_is_text() {
    let ciphertext = cipher().encrypt("{}", "pw").unwrap();
    assert!(ciphertext.is_ascii());
    assert!(!ciphertext.contains('\n'));
}

#[test]
fn decrypt_tolerates_trailing_newline() {
    let ciphertext = cipher().encrypt("{}", "pw").unwrap();
    assert_eq!(cipher().decrypt(&format!("{ciphertext}\n"), "pw").unwrap(), "{}");
}

// ---------------------------------------------------------------------------
// Non-determinism
// ---------------------------------------------------------------------------

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let ct1 = cipher().encrypt("{}", "pw").unwrap();
    let ct2 = cipher().encrypt("{}", "pw").unwrap();
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");

    // Both still decrypt to the same thing.
    assert_eq!(cipher().decrypt(&ct1, "pw").unwrap(), "{}");
    assert_eq!(cipher().decrypt(&ct2, "pw").unwrap(), "{}");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn decrypt_with_wrong_password_is_wrong_key() {
    let ciphertext = cipher().encrypt("{}", "pw1").unwrap();
    assert!(matches!(
        cipher().decrypt(&ciphertext, "pw2"),
        Err(ShelterError::WrongKey)
    ));
}

#[test]
fn password_case_matters() {
    let ciphertext = cipher().encrypt("{}", "Master").unwrap();
    assert!(matches!(
        cipher().decrypt(&ciphertext, "master"),
        Err(ShelterError::WrongKey)
    ));
}

#[test]
fn tampered_ciphertext_is_wrong_key() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let ciphertext = cipher().encrypt("{}", "pw").unwrap();
    let mut raw = BASE64.decode(&ciphertext).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    let tampered = BASE64.encode(raw);

    assert!(matches!(
        cipher().decrypt(&tampered, "pw"),
        Err(ShelterError::WrongKey)
    ));
}

#[test]
fn truncated_ciphertext_is_wrong_key() {
    let ciphertext = cipher().encrypt("{}", "pw").unwrap();
    let truncated = &ciphertext[..ciphertext.len() / 2];
    assert!(matches!(
        cipher().decrypt(truncated, "pw"),
        Err(ShelterError::WrongKey)
    ));
}

#[test]
fn plaintext_input_is_wrong_key() {
    assert!(matches!(
        cipher().decrypt(r#"{"gmail":{}}"#, "pw"),
        Err(ShelterError::WrongKey)
    ));
}

#[test]
fn weak_configured_params_are_a_cipher_fault() {
    let weak = AesGcmCipher::new(Argon2Params {
        memory_kib: 16,
        iterations: 1,
        parallelism: 1,
    });
    assert!(matches!(
        weak.encrypt("{}", "pw"),
        Err(ShelterError::CipherFault(_))
    ));
}
