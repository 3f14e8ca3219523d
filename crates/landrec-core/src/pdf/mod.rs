//! Text source for registration documents delivered as PDF.
//!
//! Only the embedded text layer is read. Scanned documents without one are
//! rejected with [`PdfError::NoTextLayer`].

mod extractor;

pub use extractor::{PdfExtractor, PdfText};

use crate::error::PdfError;

pub type Result<T> = std::result::Result<T, PdfError>;

/// A loaded PDF that can yield its text layer.
pub trait PdfProcessor {
    fn load(&mut self, data: &[u8]) -> Result<()>;

    fn page_count(&self) -> u32;

    /// Text of each page, in page order.
    fn extract_pages(&self) -> Result<PdfText>;

    /// Text of the whole document.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.text())
    }
}
