//! Recovered browsing-data records and artifact parsers.
//!
//! [`BrowsingData`] is the aggregate one recovery pass fills in: it is
//! constructed over a profile's discovered item set, then `recover` reads
//! each staged artifact and appends structured records. Items whose staged
//! copy is missing are skipped (partial discovery is normal), as are
//! individual rows that fail to parse or decrypt.
//!
//! | Item | Parser | Store |
//! |------|--------|-------|
//! | `FirefoxPassword` | [`password`] | `logins.json` |
//! | `ChromiumPassword` | [`password`] | `Login Data` (`logins`) |
//! | `FirefoxCookie` / `ChromiumCookie` | [`cookie`] | `moz_cookies` / `cookies` |
//! | `FirefoxHistory` / `ChromiumHistory` | [`history`] | `moz_places` / `urls` |
//! | `ChromiumBookmark` | [`bookmark`] | `Bookmarks` JSON |
//!
//! Key-carrier items (`ChromiumKey`, `FirefoxKey4`) are consumed during
//! master-key acquisition and produce no records.

pub mod bookmark;
pub mod chromedb;
pub mod cookie;
pub mod history;
pub mod oscrypt;
pub mod password;

pub use bookmark::BookmarkRecord;
pub use cookie::CookieRecord;
pub use history::HistoryRecord;
pub use password::LoginRecord;

use serde::Serialize;
use time::OffsetDateTime;

use crate::base::error::RecoveryError;
use crate::item::Item;
use crate::masterkey::MasterKey;
use crate::staging::StagingArea;

/// Everything recovered from one profile.
#[derive(Debug, Default, Serialize)]
pub struct BrowsingData {
    pub logins: Vec<LoginRecord>,
    pub cookies: Vec<CookieRecord>,
    pub history: Vec<HistoryRecord>,
    pub bookmarks: Vec<BookmarkRecord>,
    #[serde(skip)]
    items: Vec<Item>,
}

impl BrowsingData {
    /// An empty aggregate scoped to `items`; only those categories are
    /// touched by [`BrowsingData::recover`].
    pub fn new(items: &[Item]) -> Self {
        let mut items = items.to_vec();
        items.sort();
        items.dedup();
        BrowsingData {
            items,
            ..BrowsingData::default()
        }
    }

    /// Parse every staged artifact into records, in place.
    ///
    /// `master_key` decrypts chromium-encrypted values; an empty key is
    /// legal (v10 values still decrypt with the fallback key on Linux).
    /// A missing staged file is skipped; a malformed artifact fails the
    /// whole recovery for this profile.
    pub fn recover(
        &mut self,
        staging: &StagingArea,
        master_key: &MasterKey,
    ) -> Result<(), RecoveryError> {
        let items = self.items.clone();
        for item in items {
            let path = staging.staged_path(item);
            if !path.exists() {
                tracing::debug!(item = %item, "no staged artifact, skipping");
                continue;
            }
            match item {
                Item::FirefoxPassword => {
                    self.logins.extend(password::firefox_logins(&path)?);
                }
                Item::ChromiumPassword => {
                    self.logins
                        .extend(password::chromium_logins(&path, master_key)?);
                }
                Item::FirefoxCookie => {
                    self.cookies.extend(cookie::firefox_cookies(&path)?);
                }
                Item::ChromiumCookie => {
                    self.cookies
                        .extend(cookie::chromium_cookies(&path, master_key)?);
                }
                Item::FirefoxHistory => {
                    self.history.extend(history::firefox_history(&path)?);
                }
                Item::ChromiumHistory => {
                    self.history.extend(history::chromium_history(&path)?);
                }
                Item::ChromiumBookmark => {
                    self.bookmarks.extend(bookmark::chromium_bookmarks(&path)?);
                }
                Item::ChromiumKey | Item::FirefoxKey4 => {}
            }
        }
        Ok(())
    }

    /// Total number of recovered records across all categories.
    pub fn record_count(&self) -> usize {
        self.logins.len() + self.cookies.len() + self.history.len() + self.bookmarks.len()
    }
}

/// Unix seconds to a timestamp; 0 means "not set".
pub(crate) fn unix_secs_to_offset(secs: i64) -> Option<OffsetDateTime> {
    if secs == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(secs).ok()
}

/// Unix microseconds (Firefox PRTime) to a timestamp; 0 means "not set".
pub(crate) fn unix_micros_to_offset(micros: i64) -> Option<OffsetDateTime> {
    if micros == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp_nanos(micros as i128 * 1000).ok()
}
