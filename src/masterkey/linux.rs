//! Linux Secret Service access for the Safe Storage secret.
//!
//! Chromium stores its password in GNOME Keyring / KWallet under the
//! schema `chrome_libsecret_os_crypt_password_v2`, keyed by an
//! `("application", <browser>)` attribute. The retrieved secret is
//! stretched with PBKDF2 (1 iteration on Linux) into the v11 AES key.

use std::collections::HashMap;

use crate::base::error::RecoveryError;

use super::MasterKey;

/// Look up the Safe Storage secret for `application` and derive the key.
///
/// Returns an empty key when the keyring has no entry for this browser
/// (fresh install, or the browser fell back to v10 basic storage); errors
/// only when the keyring itself is unreachable.
pub fn secret_service_key(application: &str) -> Result<MasterKey, RecoveryError> {
    // Blocking API; no async runtime anywhere in the pipeline.
    use secret_service::blocking::SecretService;
    use secret_service::EncryptionType;

    let ss = SecretService::connect(EncryptionType::Dh)
        .map_err(|_| RecoveryError::KeyringUnavailable)?;

    let mut attributes = HashMap::new();
    attributes.insert("application", application);

    let search = ss
        .search_items(attributes)
        .map_err(|_| RecoveryError::KeyringUnavailable)?;

    let item = search
        .unlocked
        .first()
        .or_else(|| search.locked.first());

    let Some(item) = item else {
        tracing::debug!(application, "no Safe Storage entry in keyring");
        return Ok(MasterKey::empty());
    };

    if search.unlocked.is_empty() {
        item.unlock().map_err(|_| RecoveryError::KeyringUnavailable)?;
    }

    let secret = item
        .get_secret()
        .map_err(|_| RecoveryError::KeyringUnavailable)?;

    let key = super::derive_key(&secret, 1);
    Ok(MasterKey::new(key.to_vec()))
}
