//! Windows DPAPI access for the Safe Storage key.
//!
//! On Windows the AES-256-GCM key lives in the `Local State` JSON file
//! (`os_crypt.encrypted_key`): base64, a `DPAPI` prefix, then a blob only
//! the owning user can decrypt via `CryptUnprotectData`. The staged copy
//! of `Local State` is read, never the live file.

use crate::base::error::RecoveryError;
use crate::item::Item;
use crate::staging::StagingArea;

use super::MasterKey;

/// Recover the AES-256 key from the staged `Local State` copy.
///
/// Returns an empty key when no `Local State` was staged for this
/// profile; decryption of any v10 values will then fail per value rather
/// than aborting the profile up front.
#[cfg(target_os = "windows")]
pub fn local_state_key(staging: &StagingArea) -> Result<MasterKey, RecoveryError> {
    use base64::Engine;
    use windows::Win32::Security::Cryptography::{CryptUnprotectData, CRYPT_INTEGER_BLOB};

    let path = staging.staged_path(Item::ChromiumKey);
    if !path.exists() {
        tracing::debug!("no staged Local State, proceeding without a master key");
        return Ok(MasterKey::empty());
    }

    let local_state = std::fs::read_to_string(&path)?;
    let json: serde_json::Value = serde_json::from_str(&local_state)
        .map_err(|_| RecoveryError::invalid_data("invalid Local State JSON"))?;

    let encrypted_key_b64 = json["os_crypt"]["encrypted_key"]
        .as_str()
        .ok_or_else(|| RecoveryError::invalid_data("no encrypted_key in Local State"))?;

    let encrypted_key = base64::engine::general_purpose::STANDARD
        .decode(encrypted_key_b64)
        .map_err(|_| RecoveryError::invalid_data("invalid base64 in encrypted_key"))?;

    const DPAPI_PREFIX: &[u8] = b"DPAPI";
    if !encrypted_key.starts_with(DPAPI_PREFIX) {
        return Err(RecoveryError::invalid_data("missing DPAPI prefix"));
    }
    let dpapi_data = &encrypted_key[DPAPI_PREFIX.len()..];

    let mut blob_in = CRYPT_INTEGER_BLOB {
        cbData: dpapi_data.len() as u32,
        pbData: dpapi_data.as_ptr() as *mut u8,
    };
    let mut blob_out = CRYPT_INTEGER_BLOB::default();

    unsafe {
        CryptUnprotectData(&mut blob_in, None, None, None, None, 0, &mut blob_out)
            .map_err(|_| RecoveryError::key_acquisition("DPAPI decryption failed"))?;

        if blob_out.cbData != 32 {
            return Err(RecoveryError::key_acquisition(
                "unexpected key length from DPAPI",
            ));
        }

        let mut key = vec![0u8; 32];
        std::ptr::copy_nonoverlapping(blob_out.pbData, key.as_mut_ptr(), 32);

        // Free the memory allocated by DPAPI.
        windows::Win32::System::Memory::LocalFree(windows::Win32::Foundation::HLOCAL(
            blob_out.pbData as *mut _,
        ));

        Ok(MasterKey::new(key))
    }
}
