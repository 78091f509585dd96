use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    println!("{}: {} pages", path.as_ref().display(), doc.page_count());
    Ok(())
}
