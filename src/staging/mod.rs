//! Artifact staging.
//!
//! Browsers keep their stores open and locked while running, so artifacts
//! are copied into a staging directory before anything opens them. A
//! [`StagingArea`] owns one explicit directory; staged copies are named by
//! [`Item::staged_name`] inside it. Every orchestration unit gets its own
//! area, so concurrent units never share a staged file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::base::error::RecoveryError;
use crate::item::Item;
use crate::profile::DiscoveredProfile;

/// One staging directory, created on construction.
#[derive(Debug)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RecoveryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(StagingArea { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the staged copy of `item` lives (whether or not it has been
    /// written yet).
    pub fn staged_path(&self, item: Item) -> PathBuf {
        self.dir.join(item.staged_name())
    }

    /// Copy every discovered artifact of `profile` into this area,
    /// overwriting earlier copies. Fails with [`RecoveryError::StageIo`]
    /// on the first read or write error; the affected profile is the only
    /// casualty, the caller's other profiles are untouched.
    pub fn stage(&self, profile: &DiscoveredProfile) -> Result<(), RecoveryError> {
        for item in profile.items() {
            let Some(source) = profile.source_path(item) else {
                continue;
            };
            let bytes = fs::read(source).map_err(|err| RecoveryError::stage_io(item, err))?;
            let dest = self.staged_path(item);
            fs::write(&dest, bytes).map_err(|err| RecoveryError::stage_io(item, err))?;
            tracing::debug!(item = %item, source = %source.display(), "staged artifact");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn profile_with(item: Item, source: &Path) -> DiscoveredProfile {
        let mut item_paths = HashMap::new();
        item_paths.insert(item, source.to_path_buf());
        DiscoveredProfile::new("firefox-default".into(), item_paths)
    }

    #[test]
    fn test_stage_copies_bytes() {
        let src_dir = tempdir().unwrap();
        let source = src_dir.path().join("logins.json");
        fs::write(&source, b"{\"logins\":[]}").unwrap();

        let stage_dir = tempdir().unwrap();
        let area = StagingArea::new(stage_dir.path().join("firefox-default")).unwrap();
        area.stage(&profile_with(Item::FirefoxPassword, &source))
            .unwrap();

        let staged = fs::read(area.staged_path(Item::FirefoxPassword)).unwrap();
        assert_eq!(staged, b"{\"logins\":[]}");
    }

    #[test]
    fn test_stage_missing_source() {
        let stage_dir = tempdir().unwrap();
        let area = StagingArea::new(stage_dir.path()).unwrap();
        let err = area
            .stage(&profile_with(
                Item::FirefoxPassword,
                Path::new("/gone/logins.json"),
            ))
            .unwrap_err();

        match err {
            RecoveryError::StageIo { item, .. } => assert_eq!(item, Item::FirefoxPassword),
            other => panic!("expected StageIo, got {other:?}"),
        }
    }

    #[test]
    fn test_stage_overwrites_previous_copy() {
        let src_dir = tempdir().unwrap();
        let source = src_dir.path().join("cookies.sqlite");
        let stage_dir = tempdir().unwrap();
        let area = StagingArea::new(stage_dir.path()).unwrap();

        fs::write(&source, b"old").unwrap();
        area.stage(&profile_with(Item::FirefoxCookie, &source)).unwrap();
        fs::write(&source, b"new").unwrap();
        area.stage(&profile_with(Item::FirefoxCookie, &source)).unwrap();

        let staged = fs::read(area.staged_path(Item::FirefoxCookie)).unwrap();
        assert_eq!(staged, b"new");
    }
}
