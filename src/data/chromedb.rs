//! Chromium artifact database constants and time conversion.
//!
//! Chromium stores timestamps as microseconds since 1601-01-01 00:00:00
//! UTC (the Windows FILETIME epoch) in its SQLite stores (`cookies`,
//! `logins`, `urls`) and as decimal strings of the same epoch in the
//! `Bookmarks` JSON file.
//!
//! Reference: `base/time/time.h`, `net/extras/sqlite`.

use time::OffsetDateTime;

/// Offset between the Chromium epoch (1601) and the Unix epoch (1970),
/// in microseconds.
pub const CHROME_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// Convert a Chromium timestamp to a Unix-based timestamp.
///
/// 0 means "not set" (e.g. a session cookie) and maps to `None`.
pub fn chrome_to_unix_timestamp(chrome_time: i64) -> Option<OffsetDateTime> {
    if chrome_time == 0 {
        return None;
    }

    let unix_micros = chrome_time - CHROME_EPOCH_OFFSET_MICROS;
    OffsetDateTime::from_unix_timestamp_nanos(unix_micros as i128 * 1000).ok()
}

/// Convert a Unix-based timestamp to a Chromium timestamp.
pub fn unix_to_chrome_timestamp(time: OffsetDateTime) -> i64 {
    let unix_secs = time.unix_timestamp();
    (unix_secs * 1_000_000) + CHROME_EPOCH_OFFSET_MICROS
}
