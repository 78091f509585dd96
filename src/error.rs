//! Failure classes for a page-range extraction.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    /// Input path does not exist or cannot be read
    #[error("Cannot open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was read but is not a parseable PDF
    #[error("Not a valid PDF: {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Requested range is empty, inverted, non-positive or past the last page
    #[error("Invalid page range: {start} to {end} for PDF with {total} pages")]
    Range { start: i64, end: i64, total: u32 },

    /// Output could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// Stable name of the failure class, for callers that present it.
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::NotFound { .. } => "NotFoundError",
            SplitError::Format { .. } => "FormatError",
            SplitError::Range { .. } => "RangeError",
            SplitError::Write { .. } => "WriteError",
        }
    }
}
