//! Chromium-style single-profile discovery.
//!
//! Chromium-based browsers keep each profile in a named directory under
//! `User Data` (`Default`, `Profile 1`, ...), with a fixed artifact layout
//! inside. The family probes one configured profile directory instead of
//! walking a tree:
//!
//! - most artifacts sit directly in the profile directory
//! - the cookie store moved to `Network/Cookies` in newer Chromium
//! - `Local State` (the encrypted master key on Windows) sits one level
//!   up, beside the profile directories

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::base::error::RecoveryError;
use crate::item::Item;
use crate::masterkey::{self, MasterKey};
use crate::staging::StagingArea;

use super::{BrowserFamily, DiscoveredProfile, ProfileRoot};

/// Single-profile browser family: Chrome, Chromium, Edge, Brave, Opera.
pub struct ChromiumFamily;

impl BrowserFamily for ChromiumFamily {
    fn discover(&self, root: &ProfileRoot) -> Result<Vec<DiscoveredProfile>, RecoveryError> {
        let dir = root.root_path();
        if !dir.is_dir() {
            return Err(RecoveryError::root_not_found(dir));
        }

        let mut item_paths = HashMap::new();
        for item in root.items() {
            if let Some(path) = probe(dir, *item) {
                item_paths.insert(*item, path);
            }
        }
        if item_paths.is_empty() {
            return Ok(Vec::new());
        }

        let profile_dir = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(vec![DiscoveredProfile::new(
            format!("{}-{}", root.name(), profile_dir),
            item_paths,
        )])
    }

    fn acquire_master_key(
        &self,
        root: &ProfileRoot,
        _profile: &DiscoveredProfile,
        staging: &StagingArea,
    ) -> Result<MasterKey, RecoveryError> {
        masterkey::chromium_master_key(root.storage(), staging)
    }
}

/// Locate one item inside (or beside) a Chromium profile directory.
fn probe(profile_dir: &Path, item: Item) -> Option<PathBuf> {
    let direct = profile_dir.join(item.file_name());
    if direct.is_file() {
        return Some(direct);
    }
    match item {
        // Chromium 96 moved the cookie store under Network/.
        Item::ChromiumCookie => {
            let moved = profile_dir.join("Network").join(item.file_name());
            moved.is_file().then_some(moved)
        }
        // Local State sits in User Data, one level above the profile.
        Item::ChromiumKey => {
            let beside = profile_dir.parent()?.join(item.file_name());
            beside.is_file().then_some(beside)
        }
        _ => None,
    }
}
