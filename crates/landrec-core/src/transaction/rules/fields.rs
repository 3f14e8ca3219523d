//! Label-anchored field extraction primitives.
//!
//! Every primitive locates a label, bounds the value at the next known
//! label (or end of text), and converts what is left. A missing label or an
//! unconvertible value gives `None` or an empty list.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use super::amounts::AmountExtractor;
use super::dates::parse_date;
use super::lists::{split_names, split_tokens};
use super::table::NEXT_LABEL;
use super::FieldExtractor;

/// How much text after a label makes up the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// First whitespace-delimited token.
    Token,
    /// Rest of the line.
    Line,
    /// Everything up to the next label, across lines.
    Block,
}

/// Raw value text following `label`, bounded by the next known label.
pub fn capture<'t>(text: &'t str, label: &Regex, span: Span) -> Option<&'t str> {
    let found = label.find(text)?;
    let rest = &text[found.end()..];

    let bounded = match NEXT_LABEL.find(rest) {
        Some(next) => &rest[..next.start()],
        None => rest,
    };

    let value = match span {
        Span::Token => bounded.split_whitespace().next().unwrap_or(""),
        Span::Line => bounded.lines().next().unwrap_or("").trim(),
        Span::Block => bounded.trim(),
    };

    trace!("label {:?} captured {:?}", found.as_str().trim(), value);

    if value.is_empty() { None } else { Some(value) }
}

/// String field: the captured value, trimmed.
pub fn extract_string(text: &str, label: &Regex, span: Span) -> Option<String> {
    capture(text, label, span).map(|value| value.to_string())
}

/// Date field: the captured value read as a date.
pub fn extract_date(text: &str, label: &Regex, span: Span) -> Option<NaiveDate> {
    capture(text, label, span).and_then(parse_date)
}

/// Decimal field: the captured value with separators stripped.
pub fn extract_decimal(text: &str, label: &Regex, span: Span) -> Option<Decimal> {
    capture(text, label, span)
        .and_then(|value| AmountExtractor::new().extract(value))
        .map(|m| m.value)
}

/// Name-list field: the captured value split on ordinal markers.
pub fn extract_names(text: &str, label: &Regex, span: Span) -> Vec<String> {
    capture(text, label, span).map(split_names).unwrap_or_default()
}

/// Token-list field: the captured value split on commas.
pub fn extract_tokens(text: &str, label: &Regex, span: Span) -> Vec<String> {
    capture(text, label, span).map(split_tokens).unwrap_or_default()
}
