//! Recovery error types.
//!
//! A single [`RecoveryError`] covers the whole pipeline. Errors scoped to
//! one profile (staging, key acquisition, recovery) never abort sibling
//! profiles; only [`RecoveryError::RootNotFound`] aborts a whole
//! profile-root discovery.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The configured profile root does not exist or is not a directory.
    /// Fatal to the whole profile root.
    #[error("profile root does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Reading a discovered artifact or writing its staged copy failed.
    /// Fatal to the affected profile only.
    #[error("failed to stage {item}: {source}")]
    StageIo {
        item: Item,
        #[source]
        source: io::Error,
    },

    /// The master-key collaborator failed outright. An *absent* key is
    /// not an error; providers return an empty key for that case.
    #[error("master key acquisition failed: {0}")]
    KeyAcquisition(String),

    /// The system keyring/keychain could not be reached or unlocked.
    #[error("system keyring unavailable")]
    KeyringUnavailable,

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The staged artifact database is busy or locked.
    #[error("artifact database is locked")]
    DatabaseLocked,

    #[error("artifact database error: {message}")]
    Database { message: String },

    #[error("platform not supported: {0}")]
    PlatformNotSupported(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RecoveryError {
    pub fn root_not_found(path: impl AsRef<Path>) -> Self {
        RecoveryError::RootNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn stage_io(item: Item, source: io::Error) -> Self {
        RecoveryError::StageIo { item, source }
    }

    pub fn key_acquisition(reason: impl Into<String>) -> Self {
        RecoveryError::KeyAcquisition(reason.into())
    }

    pub fn decryption_failed(reason: impl Into<String>) -> Self {
        RecoveryError::DecryptionFailed(reason.into())
    }

    pub fn invalid_data(reason: impl Into<String>) -> Self {
        RecoveryError::InvalidData(reason.into())
    }

    /// True when the error aborts a single profile rather than the run.
    pub fn is_profile_scoped(&self) -> bool {
        !matches!(self, RecoveryError::RootNotFound { .. })
    }
}

impl From<rusqlite::Error> for RecoveryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ffi::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ffi::ErrorCode::DatabaseLocked =>
            {
                RecoveryError::DatabaseLocked
            }
            _ => RecoveryError::Database {
                message: err.to_string(),
            },
        }
    }
}
