//! errors.rs - Custom error types for the cnpii-core library.
//!
//! Per-document analysis never fails: absence of PII is an ordinary empty
//! result, and malformed candidate text simply produces no candidate. The
//! variants below cover the one path that must fail fast instead of
//! guessing — configuration loading and engine construction — because a
//! silently misconfigured engine would leak unredacted PII.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `cnpii-core`.
///
/// `#[non_exhaustive]` signals to consumers that new variants may be added
/// in future versions without a breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CnPiiError {
    #[error("Configuration validation failed:\n{0}")]
    ConfigValidation(String),

    #[error("Failed to read configuration file '{0}': {1}")]
    ConfigRead(String, std::io::Error),

    #[error("Failed to parse configuration file '{0}': {1}")]
    ConfigParse(String, serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
