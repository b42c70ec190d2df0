//! Profile roots, discovery, and browser family variants.
//!
//! A [`ProfileRoot`] describes where one browser family keeps its profiles
//! and which artifact categories the caller wants. Discovery turns a root
//! into zero or more [`DiscoveredProfile`]s, each carrying the subset of
//! requested items actually present in its profile folder.
//!
//! Families differ in how profiles are located:
//!
//! - [`firefox::FirefoxFamily`] walks the root recursively and partitions
//!   matches by profile folder (a root can hold many concurrent profiles)
//! - [`chromium::ChromiumFamily`] probes one configured profile directory
//!   directly (`User Data/Default`, `User Data/Profile 1`, ...)
//!
//! Both share the staging and recovery pipeline in [`crate::pipeline`].

pub mod chromium;
pub mod firefox;
pub mod matcher;
pub mod paths;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::base::error::RecoveryError;
use crate::item::Item;
use crate::masterkey::MasterKey;
use crate::staging::StagingArea;

/// The configured location and artifact request for one browser family.
///
/// Read-only after construction; one instance per installed browser.
#[derive(Debug, Clone)]
pub struct ProfileRoot {
    name: String,
    storage: String,
    root_path: PathBuf,
    items: Vec<Item>,
}

impl ProfileRoot {
    pub fn new(
        name: impl Into<String>,
        storage: impl Into<String>,
        root_path: impl Into<PathBuf>,
        items: Vec<Item>,
    ) -> Self {
        ProfileRoot {
            name: name.into(),
            storage: storage.into(),
            root_path: root_path.into(),
            items,
        }
    }

    /// Browser family label, e.g. `"firefox"` or `"chrome"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Safe Storage discriminator: the Secret Service `application`
    /// attribute on Linux, the Keychain service label on macOS. Empty for
    /// families without an OS-level master-key scheme.
    pub fn storage(&self) -> &str {
        &self.storage
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// One logical profile found under a [`ProfileRoot`].
///
/// Created only when at least one requested artifact was found, so
/// `item_paths` is never empty. Consumed exactly once by the pipeline.
#[derive(Debug, Clone)]
pub struct DiscoveredProfile {
    name: String,
    item_paths: HashMap<Item, PathBuf>,
}

impl DiscoveredProfile {
    pub(crate) fn new(name: String, item_paths: HashMap<Item, PathBuf>) -> Self {
        debug_assert!(!item_paths.is_empty());
        DiscoveredProfile { name, item_paths }
    }

    /// Synthesized as `"<family>-<profile folder>"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The items found for this profile, in stable order.
    pub fn items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.item_paths.keys().copied().collect();
        items.sort();
        items
    }

    pub fn item_paths(&self) -> &HashMap<Item, PathBuf> {
        &self.item_paths
    }

    pub fn source_path(&self, item: Item) -> Option<&Path> {
        self.item_paths.get(&item).map(PathBuf::as_path)
    }
}

/// Capability interface implemented once per browser family.
///
/// `discover` yields independent profiles; `acquire_master_key` runs after
/// staging and may legitimately return an empty key for families without
/// a master-key scheme. Keys are scoped to one profile and must never be
/// reused across profiles.
pub trait BrowserFamily: Send + Sync {
    fn discover(&self, root: &ProfileRoot) -> Result<Vec<DiscoveredProfile>, RecoveryError>;

    fn acquire_master_key(
        &self,
        root: &ProfileRoot,
        profile: &DiscoveredProfile,
        staging: &StagingArea,
    ) -> Result<MasterKey, RecoveryError>;
}
