//! Filesystem matcher and profile partitioner.
//!
//! The matcher walks a profile root once, depth-first with lexical
//! ordering inside each directory, and records every file whose base name
//! equals a requested item's canonical file name. Matches are grouped by
//! the base name of their parent directory; each group later becomes one
//! independent profile.
//!
//! Per-entry traversal errors (permission denied, broken symlinks) are
//! logged and skipped; only a missing root aborts the walk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::base::error::RecoveryError;
use crate::item::Item;

use super::DiscoveredProfile;

/// Matched artifact paths, grouped by parent-directory base name.
pub type GroupedItemPaths = HashMap<String, HashMap<Item, PathBuf>>;

/// Walk `root` and group every requested-item match by parent directory.
///
/// Fails with [`RecoveryError::RootNotFound`] before walking when `root`
/// does not exist or is not a directory. Groups are created on first
/// match only, so no group in the result is empty.
pub fn walk_matching(root: &Path, items: &[Item]) -> Result<GroupedItemPaths, RecoveryError> {
    if !root.is_dir() {
        return Err(RecoveryError::root_not_found(root));
    }

    let mut groups: GroupedItemPaths = HashMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        for item in items {
            if file_name == item.file_name() {
                let group = parent_base_dir(entry.path());
                groups
                    .entry(group)
                    .or_default()
                    .insert(*item, entry.path().to_path_buf());
            }
        }
    }
    Ok(groups)
}

/// One [`DiscoveredProfile`] per group, named `"<family>-<group>"`.
///
/// The result is sorted by profile name. An empty input produces an empty
/// list; a browser with nothing installed is not an error.
pub fn partition(family: &str, groups: GroupedItemPaths) -> Vec<DiscoveredProfile> {
    let mut profiles: Vec<DiscoveredProfile> = groups
        .into_iter()
        .map(|(dir, item_paths)| {
            DiscoveredProfile::new(format!("{}-{}", family, dir), item_paths)
        })
        .collect();
    profiles.sort_by(|a, b| a.name().cmp(b.name()));
    profiles
}

/// Base name of the directory containing `path`.
fn parent_base_dir(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parent_base_dir() {
        assert_eq!(parent_base_dir(Path::new("/p/default/logins.json")), "default");
        assert_eq!(parent_base_dir(Path::new("logins.json")), "");
    }

    #[test]
    fn test_root_not_found() {
        let err = walk_matching(Path::new("/definitely/not/here"), &[Item::FirefoxPassword]);
        assert!(matches!(err, Err(RecoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_groups_by_parent_dir() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("default")).unwrap();
        fs::create_dir(root.path().join("work")).unwrap();
        fs::write(root.path().join("default/logins.json"), b"{}").unwrap();
        fs::write(root.path().join("default/cookies.sqlite"), b"db").unwrap();
        fs::write(root.path().join("work/logins.json"), b"{}").unwrap();

        let groups = walk_matching(
            root.path(),
            &[Item::FirefoxPassword, Item::FirefoxCookie],
        )
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["default"].len(), 2);
        assert_eq!(groups["work"].len(), 1);
        assert_eq!(
            groups["work"][&Item::FirefoxPassword],
            root.path().join("work/logins.json")
        );
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("default")).unwrap();
        fs::write(root.path().join("default/prefs.js"), b"").unwrap();

        let groups = walk_matching(root.path(), &[Item::FirefoxPassword]).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_partition_names_and_order() {
        let root = tempdir().unwrap();
        for dir in ["work", "default"] {
            fs::create_dir(root.path().join(dir)).unwrap();
            fs::write(root.path().join(dir).join("logins.json"), b"{}").unwrap();
        }

        let groups = walk_matching(root.path(), &[Item::FirefoxPassword]).unwrap();
        let profiles = partition("firefox", groups);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name(), "firefox-default");
        assert_eq!(profiles[1].name(), "firefox-work");
        for profile in &profiles {
            assert_eq!(profile.items(), vec![Item::FirefoxPassword]);
        }
    }

    #[test]
    fn test_partition_empty_groups() {
        assert!(partition("firefox", GroupedItemPaths::new()).is_empty());
    }
}
