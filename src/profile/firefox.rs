//! Firefox-style multi-profile discovery.
//!
//! Firefox keeps every profile in its own folder under one root
//! (`xxxxxxxx.default`, `xxxxxxxx.default-release`, ...). The family walks
//! the whole root and turns every folder that holds at least one requested
//! artifact into its own independent profile.

use crate::base::error::RecoveryError;
use crate::masterkey::MasterKey;
use crate::staging::StagingArea;

use super::matcher;
use super::{BrowserFamily, DiscoveredProfile, ProfileRoot};

/// Multi-profile browser family: Firefox and its derivatives.
pub struct FirefoxFamily;

impl BrowserFamily for FirefoxFamily {
    fn discover(&self, root: &ProfileRoot) -> Result<Vec<DiscoveredProfile>, RecoveryError> {
        let groups = matcher::walk_matching(root.root_path(), root.items())?;
        Ok(matcher::partition(root.name(), groups))
    }

    /// Firefox guards its credential store with NSS key material inside
    /// the profile, not with an OS-level Safe Storage secret, so there is
    /// no master key to acquire at this layer. Login records keep their
    /// encrypted fields verbatim.
    fn acquire_master_key(
        &self,
        _root: &ProfileRoot,
        _profile: &DiscoveredProfile,
        _staging: &StagingArea,
    ) -> Result<MasterKey, RecoveryError> {
        Ok(MasterKey::empty())
    }
}
