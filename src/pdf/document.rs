use crate::error::{Result, SplitError};
use log::debug;
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// A PDF opened read-only for the duration of one operation.
pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
    pages: Vec<ObjectId>,
}

impl PdfDocument {
    /// Open `path`, telling an unreadable file apart from a malformed one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| SplitError::NotFound {
            path: path.clone(),
            source,
        })?;
        let doc = Document::load_mem(&bytes).map_err(|source| SplitError::Format {
            path: path.clone(),
            source,
        })?;

        // get_pages is keyed by 1-based page number, so values come out in order
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!(
            "opened {} ({} bytes, {} pages)",
            path.display(),
            bytes.len(),
            pages.len()
        );

        Ok(PdfDocument { doc, path, pages })
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Object id of the page at a 0-based index
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.pages.get(index).copied()
    }
}
