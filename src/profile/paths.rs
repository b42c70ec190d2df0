//! Known browser profile locations.
//!
//! Standard per-platform locations for the supported browsers, so callers
//! can enumerate installed browsers without hand-writing paths. Chromium
//! entries point at the `Default` profile directory; the firefox entry
//! points at the profiles root (it is walked recursively).
//!
//! The `storage` label carried by each root is what master-key
//! acquisition needs on that platform: the Secret Service `application`
//! attribute on Linux, the Keychain service name on macOS, and empty on
//! Windows (the key comes from `Local State` via DPAPI).

use std::path::PathBuf;

use crate::item::Item;

use super::ProfileRoot;

/// Candidate roots for every supported browser on this platform.
///
/// Paths are constructed from the user's environment and are not checked
/// for existence; see [`installed_roots`].
pub fn default_roots() -> Vec<ProfileRoot> {
    #[cfg(target_os = "linux")]
    {
        let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
            return Vec::new();
        };
        vec![
            chromium_root("chrome", "chrome", home.join(".config/google-chrome/Default")),
            chromium_root("chromium", "chromium", home.join(".config/chromium/Default")),
            chromium_root(
                "brave",
                "brave",
                home.join(".config/BraveSoftware/Brave-Browser/Default"),
            ),
            // Edge and Opera reuse the chromium keyring entry.
            chromium_root("edge", "chromium", home.join(".config/microsoft-edge/Default")),
            firefox_root(home.join(".mozilla/firefox")),
        ]
    }

    #[cfg(target_os = "macos")]
    {
        let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
            return Vec::new();
        };
        let app_support = home.join("Library/Application Support");
        vec![
            chromium_root(
                "chrome",
                "Chrome Safe Storage",
                app_support.join("Google/Chrome/Default"),
            ),
            chromium_root(
                "chromium",
                "Chromium Safe Storage",
                app_support.join("Chromium/Default"),
            ),
            chromium_root(
                "brave",
                "Brave Safe Storage",
                app_support.join("BraveSoftware/Brave-Browser/Default"),
            ),
            chromium_root(
                "edge",
                "Microsoft Edge Safe Storage",
                app_support.join("Microsoft Edge/Default"),
            ),
            firefox_root(app_support.join("Firefox/Profiles")),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        let mut roots = Vec::new();
        if let Some(local) = std::env::var_os("LOCALAPPDATA").map(PathBuf::from) {
            roots.push(chromium_root(
                "chrome",
                "",
                local.join("Google/Chrome/User Data/Default"),
            ));
            roots.push(chromium_root(
                "edge",
                "",
                local.join("Microsoft/Edge/User Data/Default"),
            ));
            roots.push(chromium_root(
                "brave",
                "",
                local.join("BraveSoftware/Brave-Browser/User Data/Default"),
            ));
        }
        if let Some(roaming) = std::env::var_os("APPDATA").map(PathBuf::from) {
            roots.push(firefox_root(roaming.join("Mozilla/Firefox/Profiles")));
        }
        roots
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}

/// [`default_roots`] filtered down to roots whose path exists.
pub fn installed_roots() -> Vec<ProfileRoot> {
    default_roots()
        .into_iter()
        .filter(|root| root.root_path().is_dir())
        .collect()
}

fn chromium_root(name: &str, storage: &str, path: PathBuf) -> ProfileRoot {
    ProfileRoot::new(name, storage, path, Item::chromium_items())
}

fn firefox_root(path: PathBuf) -> ProfileRoot {
    ProfileRoot::new("firefox", "", path, Item::firefox_items())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roots_include_firefox() {
        let roots = default_roots();
        if roots.is_empty() {
            return; // no HOME/APPDATA in this environment
        }
        assert!(roots.iter().any(|r| r.name() == "firefox"));
    }

    #[test]
    fn test_firefox_root_has_no_storage() {
        for root in default_roots() {
            if root.name() == "firefox" {
                assert!(root.storage().is_empty());
                assert_eq!(root.items(), Item::firefox_items());
            }
        }
    }
}
