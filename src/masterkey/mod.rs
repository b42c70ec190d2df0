//! Safe Storage master-key acquisition.
//!
//! Chromium-based browsers protect stored values with a per-user secret
//! ("Safe Storage") kept in the platform credential manager:
//!
//! - **Linux**: libsecret/GNOME Keyring via the Secret Service API
//! - **macOS**: Keychain generic password
//! - **Windows**: AES key in the `Local State` file, DPAPI-protected
//!
//! On Linux and macOS the stored secret is stretched to a 16-byte AES key
//! with PBKDF2-HMAC-SHA1, matching Chromium's `os_crypt` derivation. An
//! absent secret is not an error: acquisition returns an empty key and
//! v10 values still decrypt with the hardcoded fallback key.
//!
//! Keys are acquired per profile, returned by value, and handed straight
//! to recovery; nothing caches them across profiles.

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

use std::fmt;

use zeroize::Zeroizing;

use crate::base::error::RecoveryError;
use crate::staging::StagingArea;

/// A profile-scoped master secret, zeroized on drop.
///
/// May be empty: some families use no master-key scheme, and a missing
/// keyring entry is a legitimate state.
pub struct MasterKey(Zeroizing<Vec<u8>>);

impl MasterKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        MasterKey(Zeroizing::new(bytes))
    }

    pub fn empty() -> Self {
        MasterKey(Zeroizing::new(Vec::new()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey({} bytes)", self.0.len())
    }
}

/// Derive a 16-byte AES key from a Safe Storage secret using
/// PBKDF2-HMAC-SHA1 with the fixed salt `saltysalt`.
///
/// This matches Chromium's key derivation in `os_crypt` (1 iteration on
/// Linux, 1003 on macOS).
pub fn derive_key(password: &[u8], iterations: u32) -> [u8; 16] {
    use boring::hash::MessageDigest;
    use boring::pkcs5::pbkdf2_hmac;

    let salt = b"saltysalt";
    let mut key = [0u8; 16];

    pbkdf2_hmac(
        password,
        salt,
        iterations as usize,
        MessageDigest::sha1(),
        &mut key,
    )
    .expect("PBKDF2 should not fail");

    key
}

/// Acquire the Safe Storage master key for a chromium-style profile.
///
/// `storage` is the platform discriminator carried by the profile root;
/// `staging` gives access to the staged `Local State` copy on Windows.
#[allow(unused_variables)]
pub fn chromium_master_key(
    storage: &str,
    staging: &StagingArea,
) -> Result<MasterKey, RecoveryError> {
    #[cfg(target_os = "linux")]
    {
        linux::secret_service_key(storage)
    }

    #[cfg(target_os = "macos")]
    {
        macos::keychain_key(storage)
    }

    #[cfg(target_os = "windows")]
    {
        windows::local_state_key(staging)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Err(RecoveryError::PlatformNotSupported(
            "Safe Storage access not supported on this platform".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_one_iteration() {
        // Chromium's hardcoded Linux fallback: password "peanuts".
        let key = derive_key(b"peanuts", 1);
        let expected: [u8; 16] = [
            0xfd, 0x62, 0x1f, 0xe5, 0xa2, 0xb4, 0x02, 0x53, 0x9d, 0xfa, 0x14, 0x7c, 0xa9, 0x27,
            0x27, 0x78,
        ];
        assert_eq!(key, expected);
    }

    #[test]
    fn test_derive_key_empty_password() {
        let key = derive_key(b"", 1);
        let expected: [u8; 16] = [
            0xd0, 0xd0, 0xec, 0x9c, 0x7d, 0x77, 0xd4, 0x3a, 0xc5, 0x41, 0x87, 0xfa, 0x48, 0x18,
            0xd1, 0x7f,
        ];
        assert_eq!(key, expected);
    }

    #[test]
    fn test_derive_key_iteration_counts_differ() {
        let key_linux = derive_key(b"secret", 1);
        let key_macos = derive_key(b"secret", 1003);
        assert_ne!(key_linux, key_macos);
    }

    #[test]
    fn test_master_key_debug_redacts() {
        let key = MasterKey::new(vec![0xAA; 16]);
        let debug = format!("{key:?}");
        assert_eq!(debug, "MasterKey(16 bytes)");
        assert!(!debug.contains("170"));
    }

    #[test]
    fn test_empty_master_key() {
        assert!(MasterKey::empty().is_empty());
        assert!(!MasterKey::new(vec![1]).is_empty());
    }
}
