//! Rule-based field extractors for registration-office transaction sections.

pub mod amounts;
pub mod dates;
pub mod fields;
pub mod lists;
pub mod patterns;
pub mod table;

pub use amounts::{AmountExtractor, format_rupee_amount, parse_rupee_amount};
pub use dates::{DateExtractor, parse_date};
pub use fields::{Span, capture, extract_date, extract_decimal, extract_names, extract_string, extract_tokens};
pub use lists::{split_names, split_tokens};
pub use table::{ExtractedFields, FieldRule, FieldValue, RULES, ValueKind, extract_record, rule_for};

/// Trait for typed value extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the value.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value together with the text it was read from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
