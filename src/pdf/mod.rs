pub mod document;
pub mod output;

#[cfg(test)]
pub mod fixtures;

pub use document::PdfDocument;
pub use output::OutputDocument;
