//! Per-profile orchestration.
//!
//! [`discover`] turns one [`ProfileRoot`] into a list of independent
//! [`ProfileSession`]s, one per discovered profile. Each session owns an
//! exclusive staging directory under the caller's staging root, so
//! sessions may be processed concurrently without sharing any staged
//! file.
//!
//! [`ProfileSession::run`] drives one profile through its lifecycle:
//! stage the discovered artifacts, acquire the master key, recover the
//! staged copies into a [`BrowsingData`] aggregate. Every step runs
//! exactly once; a failure at any step ends that profile only, sibling
//! sessions and other browser families are unaffected.

use std::path::Path;
use std::sync::Arc;

use crate::base::error::RecoveryError;
use crate::data::BrowsingData;
use crate::profile::{BrowserFamily, DiscoveredProfile, ProfileRoot};
use crate::staging::StagingArea;

/// Handle for one discovered profile, ready to be processed.
pub struct ProfileSession {
    root: ProfileRoot,
    profile: DiscoveredProfile,
    family: Arc<dyn BrowserFamily>,
    staging: StagingArea,
}

/// Discover every profile under `root` and prepare one session per
/// profile.
///
/// Fails only when the root itself is missing
/// ([`RecoveryError::RootNotFound`]) or a staging directory cannot be
/// created. A browser with nothing installed yields an empty list, which
/// is not an error for a multi-browser run.
pub fn discover(
    family: Arc<dyn BrowserFamily>,
    root: &ProfileRoot,
    staging_root: &Path,
) -> Result<Vec<ProfileSession>, RecoveryError> {
    let profiles = family.discover(root)?;
    if profiles.is_empty() {
        tracing::warn!(family = root.name(), "no profiles discovered");
        return Ok(Vec::new());
    }

    let mut sessions = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let staging = StagingArea::new(staging_root.join(profile.name()))?;
        tracing::debug!(profile = profile.name(), "prepared session");
        sessions.push(ProfileSession {
            root: root.clone(),
            profile,
            family: Arc::clone(&family),
            staging,
        });
    }
    Ok(sessions)
}

impl ProfileSession {
    /// The profile's name, e.g. `"firefox-abcd1234.default"`.
    pub fn name(&self) -> &str {
        self.profile.name()
    }

    pub fn profile(&self) -> &DiscoveredProfile {
        &self.profile
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Stage, acquire the master key, recover. Runs each step exactly
    /// once and returns the recovered aggregate, owned by the caller.
    pub fn run(&self) -> Result<BrowsingData, RecoveryError> {
        self.staging.stage(&self.profile)?;

        let master_key = self
            .family
            .acquire_master_key(&self.root, &self.profile, &self.staging)?;

        let mut data = BrowsingData::new(&self.profile.items());
        data.recover(&self.staging, &master_key)?;

        tracing::debug!(
            profile = self.profile.name(),
            records = data.record_count(),
            "recovery complete"
        );
        Ok(data)
    }
}
