//! Chromium os_crypt compatible value decryption.
//!
//! Decrypts the `encrypted_value`/`password_value` blobs Chromium writes
//! into its SQLite stores. The master key is passed in explicitly by the
//! caller; nothing here caches key material.
//!
//! ## Encryption Versions
//! - **v10 (Linux)**: AES-128-CBC, PBKDF2 key from the hardcoded
//!   "peanuts" password (no keyring required)
//! - **v11 (Linux)**: AES-128-CBC with the keyring-derived key
//! - **v10 (macOS)**: AES-128-CBC with the Keychain-derived key
//! - **v10 (Windows)**: AES-256-GCM with the DPAPI-protected key
//!
//! Unprefixed values are stored as plaintext and passed through.

use crate::base::error::RecoveryError;
use crate::masterkey::MasterKey;

/// v10 prefix used by Chromium for encrypted values.
pub const V10_PREFIX: &[u8] = b"v10";
/// v11 prefix (requires a keyring-derived key).
pub const V11_PREFIX: &[u8] = b"v11";

/// Pre-computed v10 fallback key:
/// PBKDF2-HMAC-SHA1(password="peanuts", salt="saltysalt", iterations=1).
#[cfg(not(target_os = "windows"))]
const V10_KEY: [u8; 16] = [
    0xfd, 0x62, 0x1f, 0xe5, 0xa2, 0xb4, 0x02, 0x53, 0x9d, 0xfa, 0x14, 0x7c, 0xa9, 0x27, 0x27, 0x78,
];

/// IV used for CBC values: 16 space characters.
#[cfg(not(target_os = "windows"))]
const AES_CBC_IV: [u8; 16] = [0x20; 16];

/// Check if a stored value has a known Chromium encryption prefix.
pub fn is_encrypted(data: &[u8]) -> bool {
    data.starts_with(V10_PREFIX) || data.starts_with(V11_PREFIX)
}

/// Get the encryption version from the prefix.
pub fn encryption_version(data: &[u8]) -> Option<u8> {
    if data.starts_with(V10_PREFIX) {
        Some(10)
    } else if data.starts_with(V11_PREFIX) {
        Some(11)
    } else {
        None
    }
}

/// Decrypt one stored value with the profile's master key.
///
/// Empty input decrypts to the empty string; unprefixed input is treated
/// as plaintext.
pub fn decrypt(encrypted: &[u8], master_key: &MasterKey) -> Result<String, RecoveryError> {
    if encrypted.is_empty() {
        return Ok(String::new());
    }

    #[cfg(not(target_os = "windows"))]
    {
        if is_encrypted(encrypted) {
            return decrypt_cbc(encrypted, master_key);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if encrypted.starts_with(V10_PREFIX) {
            return decrypt_gcm(encrypted, master_key);
        }
    }

    String::from_utf8(encrypted.to_vec())
        .map_err(|_| RecoveryError::invalid_data("stored value is not UTF-8"))
}

#[cfg(not(target_os = "windows"))]
fn decrypt_cbc(encrypted: &[u8], master_key: &MasterKey) -> Result<String, RecoveryError> {
    // v10 and v11 prefixes are the same length.
    let ciphertext = &encrypted[V10_PREFIX.len()..];
    if ciphertext.is_empty() {
        return Ok(String::new());
    }

    let key: [u8; 16] = match master_key.as_bytes().try_into() {
        Ok(key) => key,
        // Without a keyring key, v10 still decrypts with the fallback.
        Err(_) if encrypted.starts_with(V10_PREFIX) => V10_KEY,
        Err(_) => {
            return Err(RecoveryError::decryption_failed(
                "v11 value requires a keyring key",
            ))
        }
    };

    let plaintext = decrypt_aes_cbc(&key, &AES_CBC_IV, ciphertext)
        .ok_or_else(|| RecoveryError::decryption_failed("AES-CBC decryption failed"))?;
    String::from_utf8(plaintext)
        .map_err(|_| RecoveryError::invalid_data("decrypted value is not UTF-8"))
}

/// Decrypt AES-CBC data with PKCS7 padding.
#[cfg(not(target_os = "windows"))]
fn decrypt_aes_cbc(key: &[u8; 16], iv: &[u8; 16], data: &[u8]) -> Option<Vec<u8>> {
    use boring::symm::{Cipher, Crypter, Mode};

    // Ciphertext must be a whole number of blocks.
    if data.is_empty() || data.len() % 16 != 0 {
        return None;
    }

    let cipher = Cipher::aes_128_cbc();
    let mut crypter = Crypter::new(cipher, Mode::Decrypt, key, Some(iv)).ok()?;
    crypter.pad(true);

    let mut plaintext = vec![0u8; data.len() + 16];
    let count = crypter.update(data, &mut plaintext).ok()?;
    let rest = crypter.finalize(&mut plaintext[count..]).ok()?;
    plaintext.truncate(count + rest);

    Some(plaintext)
}

/// Decrypt a Windows v10 value: 12-byte nonce then AES-256-GCM.
#[cfg(target_os = "windows")]
fn decrypt_gcm(encrypted: &[u8], master_key: &MasterKey) -> Result<String, RecoveryError> {
    use aes_gcm::{
        aead::{Aead, KeyInit},
        Aes256Gcm, Nonce,
    };

    const NONCE_LEN: usize = 12;

    let data = &encrypted[V10_PREFIX.len()..];
    if data.len() < NONCE_LEN {
        return Err(RecoveryError::decryption_failed("v10 value too short"));
    }

    let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
    let ciphertext = &data[NONCE_LEN..];

    let cipher = Aes256Gcm::new_from_slice(master_key.as_bytes())
        .map_err(|_| RecoveryError::decryption_failed("master key is not 32 bytes"))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| RecoveryError::decryption_failed("AES-GCM decryption failed"))?;

    String::from_utf8(plaintext)
        .map_err(|_| RecoveryError::invalid_data("decrypted value is not UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_encrypted() {
        assert!(is_encrypted(b"v10abc"));
        assert!(is_encrypted(b"v11xyz"));
        assert!(!is_encrypted(b"plain"));
        assert!(!is_encrypted(b""));
    }

    #[test]
    fn test_encryption_version() {
        assert_eq!(encryption_version(b"v10abc"), Some(10));
        assert_eq!(encryption_version(b"v11xyz"), Some(11));
        assert_eq!(encryption_version(b"plain"), None);
    }

    #[test]
    fn test_decrypt_empty() {
        let value = decrypt(b"", &MasterKey::empty()).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_decrypt_plaintext_passthrough() {
        let value = decrypt(b"plain_cookie_value", &MasterKey::empty()).unwrap();
        assert_eq!(value, "plain_cookie_value");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_decrypt_v11_without_key() {
        let result = decrypt(b"v11someciphertext", &MasterKey::empty());
        assert!(matches!(result, Err(RecoveryError::DecryptionFailed(_))));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_decrypt_v10_roundtrip() {
        use boring::symm::{encrypt, Cipher};

        let ciphertext = encrypt(
            Cipher::aes_128_cbc(),
            &V10_KEY,
            Some(&AES_CBC_IV),
            b"peanut butter",
        )
        .unwrap();
        let mut value = b"v10".to_vec();
        value.extend_from_slice(&ciphertext);

        let decrypted = decrypt(&value, &MasterKey::empty()).unwrap();
        assert_eq!(decrypted, "peanut butter");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_decrypt_v11_with_key() {
        use boring::symm::{encrypt, Cipher};

        let key = crate::masterkey::derive_key(b"session secret", 1);
        let ciphertext =
            encrypt(Cipher::aes_128_cbc(), &key, Some(&AES_CBC_IV), b"hunter2").unwrap();
        let mut value = b"v11".to_vec();
        value.extend_from_slice(&ciphertext);

        let decrypted = decrypt(&value, &MasterKey::new(key.to_vec())).unwrap();
        assert_eq!(decrypted, "hunter2");
    }
}
