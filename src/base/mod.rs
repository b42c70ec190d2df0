//! Base types and error handling.
//!
//! Provides the crate-wide error type:
//! - [`error::RecoveryError`]: discovery, staging, and recovery failures

pub mod error;
