use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Per-page text read from a PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    pub pages: Vec<String>,
}

impl PdfText {
    /// Pages joined with newlines, so a section marker at the top of a page
    /// still starts a line.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    /// Non-whitespace characters across all pages.
    pub fn char_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }

    /// 1-based numbers of pages with no text.
    pub fn blank_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.trim().is_empty())
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }
}

/// Reads registration PDFs: lopdf for structure and decryption, pdf-extract
/// for the text layer.
#[derive(Default)]
pub struct PdfExtractor {
    document: Option<Document>,
    bytes: Vec<u8>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document text from PDF bytes, requiring at least `min_text_length`
    /// non-whitespace characters.
    pub fn text_from_bytes(data: &[u8], min_text_length: usize) -> Result<String> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        let pages = extractor.extract_pages()?;

        let found = pages.char_count();
        if found < min_text_length {
            return Err(PdfError::NoTextLayer {
                found,
                required: min_text_length,
            });
        }

        let blank = pages.blank_pages();
        if !blank.is_empty() {
            warn!("Pages without text (skipped): {:?}", blank);
        }

        Ok(pages.text())
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        self.bytes = if document.is_encrypted() {
            document.decrypt("").map_err(|_| PdfError::Encrypted)?;
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("re-encoding decrypted PDF: {}", e)))?;
            debug!("Opened PDF encrypted with an empty password");
            decrypted
        } else {
            data.to_vec()
        };

        let pages = document.get_pages().len();
        if pages == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded PDF: {} pages, {} bytes", pages, data.len());

        self.document = Some(document);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.get_pages().len() as u32)
    }

    fn extract_pages(&self) -> Result<PdfText> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(&self.bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(PdfText { pages })
    }
}
