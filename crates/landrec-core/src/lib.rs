//! Core library for land-registration document processing.
//!
//! This crate provides:
//! - PDF text extraction for registration documents
//! - Splitting a document into per-transaction sections
//! - Tamil to English normalization with fallback to the original text
//! - Table-driven extraction of transaction fields (dates, values, parties, survey numbers)
//! - A record sink interface with in-memory and JSON-lines stores

pub mod error;
pub mod models;
pub mod pdf;
pub mod store;
pub mod transaction;
pub mod translate;

pub use error::{LandrecError, Result};
pub use models::config::LandrecConfig;
pub use models::transaction::{Field, PersistedTransaction, TransactionRecord};
pub use pdf::{PdfExtractor, PdfProcessor, PdfText};
pub use store::{JsonFileStore, MemoryStore, RecordSearch, RecordSink, TransactionFilter};
pub use transaction::{ParseResult, ParsedSection, TransactionParser, segment_sections};
pub use translate::{LibreTranslateClient, Normalization, Normalizer, Translator};
