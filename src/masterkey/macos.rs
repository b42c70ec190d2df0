//! macOS Keychain access for the Safe Storage secret.
//!
//! Chromium keeps a generic password under a per-product service label
//! ("Chrome Safe Storage", "Chromium Safe Storage", ...), with the
//! product name as the account. The password is stretched with PBKDF2
//! (1003 iterations on macOS) into the AES key.

use crate::base::error::RecoveryError;

use super::MasterKey;

/// Account name for a Safe Storage service label.
///
/// The Keychain account is the product name, i.e. the service label with
/// its " Safe Storage" suffix removed.
pub fn service_account(service: &str) -> &str {
    service.strip_suffix(" Safe Storage").unwrap_or(service)
}

/// Look up the Safe Storage password for `service` and derive the key.
///
/// Returns an empty key when no entry exists; errors only when the
/// Keychain denies access.
#[cfg(target_os = "macos")]
pub fn keychain_key(service: &str) -> Result<MasterKey, RecoveryError> {
    use security_framework::passwords::get_generic_password;

    let account = service_account(service);

    match get_generic_password(service, account) {
        Ok(password) => {
            let key = super::derive_key(&password, 1003);
            Ok(MasterKey::new(key.to_vec()))
        }
        // errSecItemNotFound: nothing stored for this browser.
        Err(e) if e.code() == -25300 => {
            tracing::debug!(service, "no Safe Storage entry in Keychain");
            Ok(MasterKey::empty())
        }
        Err(_) => Err(RecoveryError::KeyringUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_account() {
        assert_eq!(service_account("Chrome Safe Storage"), "Chrome");
        assert_eq!(service_account("Microsoft Edge Safe Storage"), "Microsoft Edge");
        assert_eq!(service_account("Chromium"), "Chromium");
    }
}
