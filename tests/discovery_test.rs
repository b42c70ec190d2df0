use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use browsingdata::item::Item;
use browsingdata::pipeline;
use browsingdata::profile::firefox::FirefoxFamily;
use browsingdata::profile::{BrowserFamily, ProfileRoot};
use browsingdata::RecoveryError;
use tempfile::tempdir;

fn firefox_root(path: &Path) -> ProfileRoot {
    ProfileRoot::new("firefox", "", path, Item::firefox_items())
}

#[test]
fn test_missing_root_is_fatal() {
    let staging = tempdir().unwrap();
    let root = firefox_root(Path::new("/no/such/profiles"));

    let result = pipeline::discover(Arc::new(FirefoxFamily), &root, staging.path());
    assert!(matches!(result, Err(RecoveryError::RootNotFound { .. })));
}

#[test]
fn test_two_profile_folders_two_sessions() {
    // The canonical multi-profile layout: the same artifact name in two
    // sibling profile folders must produce two independent profiles.
    let profiles_dir = tempdir().unwrap();
    for dir in ["default", "work"] {
        fs::create_dir(profiles_dir.path().join(dir)).unwrap();
        fs::write(profiles_dir.path().join(dir).join("logins.json"), b"{}").unwrap();
    }

    let root = firefox_root(profiles_dir.path());
    let profiles = FirefoxFamily.discover(&root).unwrap();

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name(), "firefox-default");
    assert_eq!(profiles[1].name(), "firefox-work");
    assert_eq!(
        profiles[0].source_path(Item::FirefoxPassword).unwrap(),
        profiles_dir.path().join("default/logins.json")
    );
    assert_eq!(
        profiles[1].source_path(Item::FirefoxPassword).unwrap(),
        profiles_dir.path().join("work/logins.json")
    );
}

#[test]
fn test_every_match_lands_in_exactly_one_profile() {
    let profiles_dir = tempdir().unwrap();
    let layout = [
        "alpha/logins.json",
        "alpha/cookies.sqlite",
        "beta/cookies.sqlite",
        "gamma/nested/places.sqlite",
    ];
    for rel in layout {
        let path = profiles_dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"x").unwrap();
    }

    let root = firefox_root(profiles_dir.path());
    let profiles = FirefoxFamily.discover(&root).unwrap();

    let mut seen = HashSet::new();
    let mut total = 0;
    for profile in &profiles {
        for (_, path) in profile.item_paths() {
            assert!(seen.insert(path.clone()), "path in two profiles: {path:?}");
            total += 1;
        }
    }
    assert_eq!(total, layout.len());

    // The nested folder groups under its own parent directory.
    assert!(profiles.iter().any(|p| p.name() == "firefox-nested"));
}

#[test]
fn test_no_matches_is_not_an_error() {
    let profiles_dir = tempdir().unwrap();
    fs::create_dir(profiles_dir.path().join("empty")).unwrap();
    fs::write(profiles_dir.path().join("empty/prefs.js"), b"").unwrap();

    let staging = tempdir().unwrap();
    let root = firefox_root(profiles_dir.path());
    let sessions =
        pipeline::discover(Arc::new(FirefoxFamily), &root, staging.path()).unwrap();
    assert!(sessions.is_empty());
}

#[test]
fn test_partial_discovery_keeps_found_subset() {
    let profiles_dir = tempdir().unwrap();
    fs::create_dir(profiles_dir.path().join("default")).unwrap();
    fs::write(
        profiles_dir.path().join("default/cookies.sqlite"),
        b"db",
    )
    .unwrap();

    let root = firefox_root(profiles_dir.path());
    let profiles = FirefoxFamily.discover(&root).unwrap();

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].items(), vec![Item::FirefoxCookie]);
    assert!(profiles[0].source_path(Item::FirefoxPassword).is_none());
}

#[test]
fn test_sessions_get_exclusive_staging_dirs() {
    let profiles_dir = tempdir().unwrap();
    for dir in ["default", "work"] {
        fs::create_dir(profiles_dir.path().join(dir)).unwrap();
        fs::write(profiles_dir.path().join(dir).join("cookies.sqlite"), b"db").unwrap();
    }

    let staging = tempdir().unwrap();
    let root = firefox_root(profiles_dir.path());
    let sessions =
        pipeline::discover(Arc::new(FirefoxFamily), &root, staging.path()).unwrap();

    let dirs: HashSet<_> = sessions.iter().map(|s| s.staging().dir()).collect();
    assert_eq!(dirs.len(), sessions.len());
}
