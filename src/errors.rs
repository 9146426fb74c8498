//! Error types for the KERI material codec

use thiserror::Error;

/// Error types for the KERI material codec.
///
/// Shortage is recoverable by the caller: buffer more bytes and retry.
/// The other kinds are terminal for the offending input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("shortage: {0}")]
    Shortage(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("derivation error: {0}")]
    Derivation(String),

    #[error("version error: {0}")]
    Version(String),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;
