//! History recovery from staged browser history stores.
//!
//! Firefox records visits in `places.sqlite` (`moz_places`, PRTime
//! microseconds); Chromium records them in `History` (`urls`, Chromium
//! epoch microseconds).

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use time::OffsetDateTime;

use crate::base::error::RecoveryError;

use super::{chromedb, unix_micros_to_offset};

/// One recovered history entry.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub url: String,
    pub title: String,
    pub visit_count: i64,
    pub last_visit_time: Option<OffsetDateTime>,
}

/// Read all history entries from a staged `places.sqlite`.
pub fn firefox_history(path: &Path) -> Result<Vec<HistoryRecord>, RecoveryError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT url, IFNULL(title, ''), visit_count, IFNULL(last_visit_date, 0)
         FROM moz_places",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut history = Vec::new();
    for row in rows {
        let Ok((url, title, visit_count, last_visit)) = row else {
            continue;
        };
        history.push(HistoryRecord {
            url,
            title,
            visit_count,
            last_visit_time: unix_micros_to_offset(last_visit),
        });
    }
    Ok(history)
}

/// Read all history entries from a staged Chromium `History` store.
pub fn chromium_history(path: &Path) -> Result<Vec<HistoryRecord>, RecoveryError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT url, IFNULL(title, ''), visit_count, IFNULL(last_visit_time, 0) FROM urls",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut history = Vec::new();
    for row in rows {
        let Ok((url, title, visit_count, last_visit)) = row else {
            continue;
        };
        history.push(HistoryRecord {
            url,
            title,
            visit_count,
            last_visit_time: chromedb::chrome_to_unix_timestamp(last_visit),
        });
    }
    Ok(history)
}
