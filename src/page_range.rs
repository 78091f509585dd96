use crate::error::{Result, SplitError};
use std::fmt;
use std::ops::RangeInclusive;

/// An inclusive, 1-based page interval known to fit inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Validate a requested `start..=end` against a document with `total_pages`.
    ///
    /// Page numbers are accepted as signed values so that zero and negative
    /// requests are reported as range errors rather than rejected upstream.
    /// Nothing is clamped: an end page past the last page is an error.
    pub fn new(start: i64, end: i64, total_pages: u32) -> Result<Self> {
        let invalid = || SplitError::Range {
            start,
            end,
            total: total_pages,
        };

        if start < 1 || end < 1 || start > end || end > i64::from(total_pages) {
            return Err(invalid());
        }

        // Both bounds are in 1..=total_pages here
        let start = u32::try_from(start).map_err(|_| invalid())?;
        let end = u32::try_from(end).map_err(|_| invalid())?;

        Ok(PageRange { start, end })
    }

    /// Number of pages covered
    pub fn page_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// 1-based page numbers, in order
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// 0-based page indices, in order
    pub fn indices(&self) -> RangeInclusive<usize> {
        (self.start - 1) as usize..=(self.end - 1) as usize
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
