//! Error types for the landrec-core library.

use thiserror::Error;

/// Main error type for the landrec library.
#[derive(Error, Debug)]
pub enum LandrecError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Translation service error.
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The text layer is missing or too short to hold transactions.
    #[error("PDF has {found} characters of text, at least {required} required (scanned document?)")]
    NoTextLayer { found: usize, required: usize },
}

/// Errors returned by a translation backend.
///
/// None of these escape the normalizer; they are logged and the section
/// text is used untranslated.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The service returned an empty translation for non-empty input.
    #[error("empty translation")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslationError::MalformedResponse(err.to_string())
        } else {
            TranslationError::Http(err.to_string())
        }
    }
}

/// Errors related to persisting and loading transaction records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored line could not be read back.
    #[error("corrupt record on line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

/// Result type for the landrec library.
pub type Result<T> = std::result::Result<T, LandrecError>;
