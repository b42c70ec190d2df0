//! Cookie recovery from staged browser cookie stores.
//!
//! Firefox keeps cookies in `cookies.sqlite` (`moz_cookies`, plaintext);
//! Chromium keeps them in `Cookies` (`cookies`, values encrypted per
//! platform). Rows that fail to map or decrypt are skipped.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use time::OffsetDateTime;

use crate::base::error::RecoveryError;
use crate::masterkey::MasterKey;

use super::{oscrypt, unix_micros_to_offset, unix_secs_to_offset};

/// One recovered cookie.
#[derive(Debug, Clone, Serialize)]
pub struct CookieRecord {
    pub host: String,
    pub name: String,
    pub value: String,
    pub path: String,
    pub create_time: Option<OffsetDateTime>,
    pub expire_time: Option<OffsetDateTime>,
    pub is_secure: bool,
    pub is_http_only: bool,
}

struct FirefoxCookieRow {
    host: String,
    name: String,
    value: String,
    path: String,
    creation_time: i64,
    expiry: i64,
    is_secure: i32,
    is_http_only: i32,
}

struct ChromiumCookieRow {
    host_key: String,
    name: String,
    value: String,
    encrypted_value: Vec<u8>,
    path: String,
    creation_utc: i64,
    expires_utc: i64,
    is_secure: i32,
    is_httponly: i32,
}

/// Read all cookies from a staged `cookies.sqlite`.
pub fn firefox_cookies(path: &Path) -> Result<Vec<CookieRecord>, RecoveryError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT host, name, value, path, creationTime, expiry, isSecure, isHttpOnly
         FROM moz_cookies",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(FirefoxCookieRow {
            host: row.get(0)?,
            name: row.get(1)?,
            value: row.get(2)?,
            path: row.get(3)?,
            creation_time: row.get(4)?,
            expiry: row.get(5)?,
            is_secure: row.get(6)?,
            is_http_only: row.get(7)?,
        })
    })?;

    let mut cookies = Vec::new();
    for row in rows {
        let Ok(row) = row else { continue };
        cookies.push(CookieRecord {
            host: row.host,
            name: row.name,
            value: row.value,
            path: row.path,
            // creationTime is PRTime (microseconds), expiry is seconds.
            create_time: unix_micros_to_offset(row.creation_time),
            expire_time: unix_secs_to_offset(row.expiry),
            is_secure: row.is_secure != 0,
            is_http_only: row.is_http_only != 0,
        });
    }
    Ok(cookies)
}

/// Read all cookies from a staged Chromium `Cookies` store, decrypting
/// encrypted values with the profile's master key.
pub fn chromium_cookies(
    path: &Path,
    master_key: &MasterKey,
) -> Result<Vec<CookieRecord>, RecoveryError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT host_key, name, value, encrypted_value, path, creation_utc, expires_utc,
                is_secure, is_httponly
         FROM cookies",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ChromiumCookieRow {
            host_key: row.get(0)?,
            name: row.get(1)?,
            value: row.get(2)?,
            encrypted_value: row.get(3)?,
            path: row.get(4)?,
            creation_utc: row.get(5)?,
            expires_utc: row.get(6)?,
            is_secure: row.get(7)?,
            is_httponly: row.get(8)?,
        })
    })?;

    let mut cookies = Vec::new();
    for row in rows {
        let Ok(row) = row else { continue };
        let value = if !row.value.is_empty() {
            row.value
        } else {
            match oscrypt::decrypt(&row.encrypted_value, master_key) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(host = %row.host_key, name = %row.name, error = %err,
                        "skipping undecryptable cookie");
                    continue;
                }
            }
        };
        cookies.push(CookieRecord {
            host: row.host_key,
            name: row.name,
            value,
            path: row.path,
            create_time: super::chromedb::chrome_to_unix_timestamp(row.creation_utc),
            expire_time: super::chromedb::chrome_to_unix_timestamp(row.expires_utc),
            is_secure: row.is_secure != 0,
            is_http_only: row.is_httponly != 0,
        });
    }
    Ok(cookies)
}
