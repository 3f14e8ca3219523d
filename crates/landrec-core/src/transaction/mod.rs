//! Transaction extraction from registration documents.

mod parser;
pub mod rules;
mod segmenter;

pub use parser::{ParseResult, ParsedSection, TransactionParser};
pub use segmenter::{Sections, segment_sections};
