//! Custom error types for the canon-builder crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CanonError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store root or a book directory does not exist.
    ///
    /// This is the only condition that aborts a run early; everything else
    /// degrades to per-chapter reporting.
    #[error("Store location not found: {}", .0.display())]
    StoreMissing(PathBuf),

    /// The store lacks the chapter record a merge was asked to update.
    #[error("No chapter record for {book} sequence {sequence}")]
    RecordMissing { book: String, sequence: u32 },

    /// A persisted record exists but cannot be read back. Fatal only for
    /// the chapter it names, not for the run.
    #[error("Unreadable record at {}: {reason}", .path.display())]
    RecordCorrupt { path: PathBuf, reason: String },

    /// A legacy record is too malformed to migrate.
    #[error("Cannot transform legacy record: {0}")]
    Transform(String),

    /// A source document or record is structurally invalid.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A code string does not name a known tradition or translation.
    #[error("Unknown code: {0}")]
    UnknownCode(String),
}

/// A convenience `Result` type alias using the crate's `CanonError` type.
pub type Result<T> = std::result::Result<T, CanonError>;
