//! # browsingdata
//!
//! A library for discovering locally installed browser profiles and
//! recovering the browsing data they store on disk.
//!
//! `browsingdata` walks a browser's profile root, partitions the artifact
//! files it finds (credential stores, cookie jars, history databases) into
//! independent logical profiles, stages a copy of each artifact into a
//! caller-controlled working directory, and decrypts/parses the staged
//! copies into structured records.
//!
//! ## Features
//!
//! - **Multi-profile discovery**: one session per profile folder found
//!   under a Firefox-style root
//! - **Single-profile probing**: direct artifact lookup for Chromium-style
//!   `User Data/<Profile>` directories
//! - **Staged processing**: artifacts are copied before they are opened,
//!   so live browser databases are never locked or mutated
//! - **Master-key acquisition**: Secret Service (Linux), Keychain (macOS),
//!   DPAPI `Local State` (Windows)
//! - **os_crypt decryption**: Chromium v10/v11 value decryption
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use browsingdata::pipeline;
//! use browsingdata::profile::firefox::FirefoxFamily;
//! use browsingdata::profile::ProfileRoot;
//! use browsingdata::item::Item;
//! use std::sync::Arc;
//!
//! let root = ProfileRoot::new(
//!     "firefox",
//!     "",
//!     "/home/me/.mozilla/firefox",
//!     Item::firefox_items(),
//! );
//! let sessions = pipeline::discover(Arc::new(FirefoxFamily), &root, "/tmp/stage".as_ref())?;
//! for session in sessions {
//!     match session.run() {
//!         Ok(data) => println!("{}: {} cookies", session.name(), data.cookies.len()),
//!         Err(e) => eprintln!("{}: {}", session.name(), e),
//!     }
//! }
//! # Ok::<(), browsingdata::base::error::RecoveryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`item`] - Registry of artifact categories and their on-disk names
//! - [`profile`] - Profile roots, discovery, and browser family variants
//! - [`staging`] - Artifact staging into a working directory
//! - [`masterkey`] - Safe Storage master-key acquisition
//! - [`data`] - Recovered record types and artifact parsers
//! - [`pipeline`] - Per-profile orchestration of stage/key/recover

pub mod base;
pub mod data;
pub mod item;
pub mod masterkey;
pub mod pipeline;
pub mod profile;
pub mod staging;

pub use base::error::RecoveryError;
pub use data::BrowsingData;
pub use item::Item;
pub use masterkey::MasterKey;
pub use pipeline::{discover, ProfileSession};
pub use profile::{BrowserFamily, DiscoveredProfile, ProfileRoot};
pub use staging::StagingArea;
