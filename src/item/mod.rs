//! Registry of browser artifact categories.
//!
//! Each [`Item`] is one category of locally stored browsing data. An item
//! knows the canonical file name it lives under inside a profile directory
//! ([`Item::file_name`]) and the canonical name its staged copy is written
//! to ([`Item::staged_name`]).
//!
//! ## Canonical file names
//!
//! | Item | On-disk name | Format |
//! |------|--------------|--------|
//! | `ChromiumKey` | `Local State` | JSON (`os_crypt.encrypted_key`) |
//! | `ChromiumPassword` | `Login Data` | SQLite (`logins`) |
//! | `ChromiumCookie` | `Cookies` | SQLite (`cookies`) |
//! | `ChromiumHistory` | `History` | SQLite (`urls`) |
//! | `ChromiumBookmark` | `Bookmarks` | JSON |
//! | `FirefoxKey4` | `key4.db` | SQLite (NSS key store) |
//! | `FirefoxPassword` | `logins.json` | JSON |
//! | `FirefoxCookie` | `cookies.sqlite` | SQLite (`moz_cookies`) |
//! | `FirefoxHistory` | `places.sqlite` | SQLite (`moz_places`) |
//!
//! Within one family's item set both tables are collision-free, so a
//! discovered file maps back to exactly one item.

use std::fmt;

/// One category of browser-stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Item {
    ChromiumKey,
    ChromiumPassword,
    ChromiumCookie,
    ChromiumHistory,
    ChromiumBookmark,
    FirefoxKey4,
    FirefoxPassword,
    FirefoxCookie,
    FirefoxHistory,
}

impl Item {
    /// The on-disk file name this item is searched for.
    pub fn file_name(&self) -> &'static str {
        match self {
            Item::ChromiumKey => "Local State",
            Item::ChromiumPassword => "Login Data",
            Item::ChromiumCookie => "Cookies",
            Item::ChromiumHistory => "History",
            Item::ChromiumBookmark => "Bookmarks",
            Item::FirefoxKey4 => "key4.db",
            Item::FirefoxPassword => "logins.json",
            Item::FirefoxCookie => "cookies.sqlite",
            Item::FirefoxHistory => "places.sqlite",
        }
    }

    /// The file name the staged copy is written under.
    pub fn staged_name(&self) -> &'static str {
        match self {
            Item::ChromiumKey => "localstate",
            Item::ChromiumPassword => "passwords",
            Item::ChromiumCookie => "cookies",
            Item::ChromiumHistory => "history",
            Item::ChromiumBookmark => "bookmarks",
            Item::FirefoxKey4 => "key4",
            Item::FirefoxPassword => "logins",
            Item::FirefoxCookie => "cookies",
            Item::FirefoxHistory => "places",
        }
    }

    /// True for items that carry key material consumed during master-key
    /// acquisition rather than parsed into records.
    pub fn is_key_material(&self) -> bool {
        matches!(self, Item::ChromiumKey | Item::FirefoxKey4)
    }

    /// Default request set for a Firefox-style profile root.
    pub fn firefox_items() -> Vec<Item> {
        vec![
            Item::FirefoxKey4,
            Item::FirefoxPassword,
            Item::FirefoxCookie,
            Item::FirefoxHistory,
        ]
    }

    /// Default request set for a Chromium-style profile directory.
    pub fn chromium_items() -> Vec<Item> {
        vec![
            Item::ChromiumKey,
            Item::ChromiumPassword,
            Item::ChromiumCookie,
            Item::ChromiumHistory,
            Item::ChromiumBookmark,
        ]
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Item::ChromiumKey => "chromium key",
            Item::ChromiumPassword => "chromium passwords",
            Item::ChromiumCookie => "chromium cookies",
            Item::ChromiumHistory => "chromium history",
            Item::ChromiumBookmark => "chromium bookmarks",
            Item::FirefoxKey4 => "firefox key4",
            Item::FirefoxPassword => "firefox passwords",
            Item::FirefoxCookie => "firefox cookies",
            Item::FirefoxHistory => "firefox history",
        };
        f.write_str(label)
    }
}
