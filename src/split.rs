//! Copy a contiguous page range of one PDF into a new PDF.

use crate::error::{Result, SplitError};
use crate::page_range::PageRange;
use crate::pdf::{OutputDocument, PdfDocument};
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub input: PathBuf,
    /// First page to keep, 1-based
    pub start_page: i64,
    /// Last page to keep, 1-based and inclusive
    pub end_page: i64,
    /// Where to write; derived from the input name when `None`
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub output_path: PathBuf,
    pub page_count: u32,
}

/// Reported after each page is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page number in the source document
    pub page: u32,
    /// Pages copied so far, including this one
    pub copied: u32,
    /// Pages that will be copied in total
    pub total: u32,
}

impl SplitRequest {
    pub fn new<P: Into<PathBuf>>(input: P, start_page: i64, end_page: i64) -> Self {
        SplitRequest {
            input: input.into(),
            start_page,
            end_page,
            output: None,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = Some(output.into());
        self
    }

    /// The explicit output path, or `{stem}_pages_{start}_to_{end}.pdf` in the
    /// current directory.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_name(&self.input, self.start_page, self.end_page),
        }
    }
}

pub fn default_output_name(input: &Path, start_page: i64, end_page: i64) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(format!("_pages_{}_to_{}.pdf", start_page, end_page));
    PathBuf::from(name)
}

/// Extract the requested range, calling `on_page` once per copied page.
///
/// Nothing is written unless the input opens, parses and holds the whole
/// range. The call is synchronous and cannot be interrupted.
pub fn extract_range<F>(request: &SplitRequest, mut on_page: F) -> Result<SplitOutcome>
where
    F: FnMut(PageProgress),
{
    let source = PdfDocument::open(&request.input)?;
    let total_pages = source.page_count();
    let range = PageRange::new(request.start_page, request.end_page, total_pages)?;
    let output_path = request.output_path();

    debug!(
        "extracting pages {} of {} from {} into {}",
        range,
        total_pages,
        source.path.display(),
        output_path.display()
    );

    let mut output = OutputDocument::new(&source);
    for (copied, (page, index)) in range.pages().zip(range.indices()).enumerate() {
        let page_id = source.page_id(index).ok_or(SplitError::Range {
            start: request.start_page,
            end: request.end_page,
            total: total_pages,
        })?;
        output
            .append_page(page_id)
            .map_err(|source_err| SplitError::Format {
                path: source.path.clone(),
                source: source_err,
            })?;
        on_page(PageProgress {
            page,
            copied: copied as u32 + 1,
            total: range.page_count(),
        });
    }

    debug!("appended {} pages", output.page_count());
    output.save(&output_path)?;
    info!(
        "wrote pages {} of {} to {}",
        range,
        source.path.display(),
        output_path.display()
    );

    Ok(SplitOutcome {
        output_path,
        page_count: range.page_count(),
    })
}
