//! Login recovery from staged credential stores.
//!
//! Chromium keeps logins in the `Login Data` SQLite store with the
//! password blob encrypted per platform; those decrypt with the
//! profile's master key. Firefox keeps logins in `logins.json` with
//! NSS-encrypted fields; those are carried verbatim in
//! [`LoginRecord::encrypted_username`] / [`LoginRecord::encrypted_password`].

use std::fs;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::base::error::RecoveryError;
use crate::masterkey::MasterKey;

use super::{chromedb, oscrypt, unix_micros_to_offset};

/// One recovered login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRecord {
    pub origin: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    pub create_time: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct FirefoxLoginsFile {
    #[serde(default)]
    logins: Vec<FirefoxLogin>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirefoxLogin {
    hostname: String,
    encrypted_username: String,
    encrypted_password: String,
    #[serde(default)]
    time_created: Option<i64>,
}

/// Read all logins from a staged `logins.json`.
pub fn firefox_logins(path: &Path) -> Result<Vec<LoginRecord>, RecoveryError> {
    let raw = fs::read_to_string(path)?;
    let file: FirefoxLoginsFile = serde_json::from_str(&raw)
        .map_err(|_| RecoveryError::invalid_data("malformed logins.json"))?;

    Ok(file
        .logins
        .into_iter()
        .map(|login| LoginRecord {
            origin: login.hostname,
            username: String::new(),
            password: String::new(),
            encrypted_username: Some(login.encrypted_username),
            encrypted_password: Some(login.encrypted_password),
            // timeCreated is in milliseconds.
            create_time: unix_micros_to_offset(login.time_created.unwrap_or(0) * 1000),
        })
        .collect())
}

struct ChromiumLoginRow {
    origin_url: String,
    username_value: String,
    password_value: Vec<u8>,
    date_created: i64,
}

/// Read all logins from a staged Chromium `Login Data` store, decrypting
/// passwords with the profile's master key.
pub fn chromium_logins(
    path: &Path,
    master_key: &MasterKey,
) -> Result<Vec<LoginRecord>, RecoveryError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT origin_url, username_value, password_value, date_created FROM logins",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ChromiumLoginRow {
            origin_url: row.get(0)?,
            username_value: row.get(1)?,
            password_value: row.get(2)?,
            date_created: row.get(3)?,
        })
    })?;

    let mut logins = Vec::new();
    for row in rows {
        let Ok(row) = row else { continue };
        // The login is still worth reporting when only the password blob
        // fails to decrypt; the field is left empty.
        let password = match oscrypt::decrypt(&row.password_value, master_key) {
            Ok(password) => password,
            Err(err) => {
                tracing::debug!(origin = %row.origin_url, error = %err,
                    "login password did not decrypt");
                String::new()
            }
        };
        logins.push(LoginRecord {
            origin: row.origin_url,
            username: row.username_value,
            password,
            encrypted_username: None,
            encrypted_password: None,
            create_time: chromedb::chrome_to_unix_timestamp(row.date_created),
        });
    }
    Ok(logins)
}
