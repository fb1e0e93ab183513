//! Error types for the px crate.
//!
//! Only genuinely fallible operations return [`Result`]; caller programming
//! errors (a zero handle where an object is required, an undersized batch
//! buffer) are precondition failures and panic at the call site instead.

use thiserror::Error;

/// Result type alias for px operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for px operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Stream I/O failed while saving or restoring native state.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The native runtime reported a type tag this crate does not know.
    #[error("unknown native type tag {0}")]
    UnknownTypeTag(u32),
}
