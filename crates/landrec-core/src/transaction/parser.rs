//! Transaction assembly: segmentation, normalization and field extraction.

use std::future::Future;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::config::LandrecConfig;
use crate::models::transaction::{Field, TransactionRecord};
use crate::translate::{Normalization, Normalizer};

use super::rules::extract_record;
use super::segmenter::segment_sections;

/// Outcome of parsing one section.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedSection {
    /// Position of the section in the document.
    pub index: usize,
    /// Extracted record.
    pub record: TransactionRecord,
    /// Whether the section was translated before extraction.
    pub normalization: Normalization,
    /// Fields the section did not yield.
    pub missing_fields: Vec<Field>,
}

/// Result of parsing a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseResult {
    /// Parsed sections in document order.
    pub sections: Vec<ParsedSection>,
    /// Parsing stopped early; `sections` holds what completed first.
    pub cancelled: bool,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ParseResult {
    /// Records in document order.
    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.sections.iter().map(|s| &s.record)
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.sections.into_iter().map(|s| s.record).collect()
    }

    /// Number of sections with the given normalization outcome.
    pub fn count(&self, normalization: Normalization) -> usize {
        self.sections
            .iter()
            .filter(|s| s.normalization == normalization)
            .count()
    }
}

/// Parses registration documents into transaction records.
#[derive(Debug, Clone)]
pub struct TransactionParser {
    normalizer: Normalizer,
    max_concurrent_sections: usize,
}

impl TransactionParser {
    /// Create a parser over the given normalizer.
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            max_concurrent_sections: 4,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &LandrecConfig) -> Self {
        Self::new(Normalizer::from_config(&config.translation))
            .with_max_concurrent_sections(config.extraction.max_concurrent_sections)
    }

    /// Set how many sections are processed at the same time.
    pub fn with_max_concurrent_sections(mut self, limit: usize) -> Self {
        self.max_concurrent_sections = limit.max(1);
        self
    }

    /// Parse every section of a document.
    pub async fn parse(&self, text: &str) -> ParseResult {
        self.parse_until(text, std::future::pending()).await
    }

    /// Parse a document and return only the records.
    pub async fn parse_records(&self, text: &str) -> Vec<TransactionRecord> {
        self.parse(text).await.into_records()
    }

    /// Parse a document, stopping when `cancel` completes.
    ///
    /// Translations still in flight are dropped. Sections completed before
    /// cancellation are returned in document order.
    pub async fn parse_until<F>(&self, text: &str, cancel: F) -> ParseResult
    where
        F: Future<Output = ()>,
    {
        let start = Instant::now();
        info!("Parsing document from {} characters of text", text.len());

        let pending = stream::iter(segment_sections(text).enumerate())
            .map(|(index, section)| self.parse_section(index, section))
            .buffered(self.max_concurrent_sections);

        tokio::pin!(pending);
        tokio::pin!(cancel);

        let mut sections = Vec::new();
        let mut cancelled = false;

        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    cancelled = true;
                    break;
                }
                next = pending.next() => match next {
                    Some(section) => sections.push(section),
                    None => break,
                },
            }
        }

        if cancelled {
            warn!("Parsing cancelled after {} sections", sections.len());
        }

        let result = ParseResult {
            sections,
            cancelled,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Parsed {} sections ({} translated, {} untranslated fallbacks) in {}ms",
            result.sections.len(),
            result.count(Normalization::Translated),
            result.count(Normalization::Fallback),
            result.processing_time_ms
        );

        result
    }

    async fn parse_section(&self, index: usize, section: &str) -> ParsedSection {
        let normalized = self.normalizer.normalize_with_status(section).await;
        let record = extract_record(&normalized.text, section);
        let missing_fields = record.missing_fields();

        if !missing_fields.is_empty() {
            debug!(
                "Section {} missing {} fields: {}",
                index,
                missing_fields.len(),
                missing_fields
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        ParsedSection {
            index,
            record,
            normalization: normalized.status,
            missing_fields,
        }
    }

    /// Parse without translation, synchronously.
    pub fn parse_untranslated(text: &str) -> Vec<TransactionRecord> {
        segment_sections(text)
            .map(|section| extract_record(section, section))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use crate::translate::Translator;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    const TAMIL_DOCUMENT: &str = "வில்லங்கச் சான்றிதழ்
வ. எண் : 1
ஆவண எண் : 100/2019
பதிவு நாள் : 02-05-2019
Nature : Sale
வ. எண் : 2
ஆவண எண் : 200/2019
பதிவு நாள் : 03-05-2019
Nature : Gift
வ. எண் : 3
ஆவண எண் : 300/2019
பதிவு நாள் : 04-05-2019
Nature : Mortgage
";

    /// Rewrites Tamil labels into English; fails on the second section.
    struct LabelTranslator;

    #[async_trait]
    impl Translator for LabelTranslator {
        async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            if text.contains("200/2019") {
                return Err(TranslationError::Http("connection reset".to_string()));
            }
            Ok(text
                .replace("வ. எண்", "Sr. No.")
                .replace("ஆவண எண்", "Document No.")
                .replace("பதிவு நாள்", "Registration Date"))
        }
    }

    /// Delays each section so later sections finish first.
    struct SlowFirst;

    #[async_trait]
    impl Translator for SlowFirst {
        async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            let delay = if text.contains("100/2019") { 60 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(text.to_string())
        }
    }

    /// Never finishes translating the second section.
    struct HangsOnSecond;

    #[async_trait]
    impl Translator for HangsOnSecond {
        async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslationError> {
            if text.contains("200/2019") {
                std::future::pending::<()>().await;
            }
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn test_no_markers_yields_empty_result() {
        let parser = TransactionParser::new(Normalizer::disabled());
        let result = parser.parse("Certificate\nNo transactions found for the period.").await;

        assert!(result.sections.is_empty());
        assert!(!result.cancelled);
    }

    #[tokio::test]
    async fn test_failed_translation_is_isolated() {
        let parser = TransactionParser::new(Normalizer::new(Arc::new(LabelTranslator), "en"));
        let result = parser.parse(TAMIL_DOCUMENT).await;

        assert_eq!(result.sections.len(), 3);
        assert_eq!(
            result.sections.iter().map(|s| s.normalization).collect::<Vec<_>>(),
            vec![
                Normalization::Translated,
                Normalization::Fallback,
                Normalization::Translated
            ]
        );

        let numbers: Vec<_> = result
            .records()
            .map(|r| r.document_number.clone().unwrap_or_default())
            .collect();
        assert_eq!(numbers, vec!["100/2019", "200/2019", "300/2019"]);

        // The untranslated section is read through its Tamil labels
        let fallback = &result.sections[1].record;
        assert_eq!(fallback.serial_number.as_deref(), Some("2"));
        assert_eq!(fallback.registration_date, NaiveDate::from_ymd_opt(2019, 5, 3));
        assert_eq!(fallback.nature.as_deref(), Some("Gift"));
    }

    #[tokio::test]
    async fn test_original_text_is_pre_translation() {
        let parser = TransactionParser::new(Normalizer::new(Arc::new(LabelTranslator), "en"));
        let result = parser.parse(TAMIL_DOCUMENT).await;

        let originals: Vec<&str> = segment_sections(TAMIL_DOCUMENT).collect();
        for (section, original) in result.sections.iter().zip(originals) {
            assert_eq!(section.record.original_text, original);
        }
        assert!(result.sections[0].record.original_text.contains("வ. எண்"));
    }

    #[tokio::test]
    async fn test_concurrent_sections_keep_document_order() {
        let parser = TransactionParser::new(Normalizer::new(Arc::new(SlowFirst), "en"))
            .with_max_concurrent_sections(3);
        let records = parser.parse_records(TAMIL_DOCUMENT).await;

        let serials: Vec<_> = records.iter().map(|r| r.serial_number.clone()).collect();
        assert_eq!(
            serials,
            vec![Some("1".to_string()), Some("2".to_string()), Some("3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_cancel_returns_completed_sections() {
        let parser = TransactionParser::new(Normalizer::new(Arc::new(HangsOnSecond), "en"))
            .with_max_concurrent_sections(1);
        let result = parser
            .parse_until(TAMIL_DOCUMENT, tokio::time::sleep(Duration::from_millis(100)))
            .await;

        assert!(result.cancelled);
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].record.document_number.as_deref(), Some("100/2019"));
    }

    #[test]
    fn test_parse_untranslated() {
        let records = TransactionParser::parse_untranslated(TAMIL_DOCUMENT);

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].document_number.as_deref(), Some("300/2019"));
        assert_eq!(records[2].nature.as_deref(), Some("Mortgage"));
    }

    #[tokio::test]
    async fn test_malformed_date_does_not_block_section() {
        let text = "Sr. No. : 9\nDocument No. : 42/2020\nExecution Date : N/A\nVillage : Kottur\n";
        let parser = TransactionParser::new(Normalizer::disabled());
        let result = parser.parse(text).await;

        let section = &result.sections[0];
        assert_eq!(section.record.execution_date, None);
        assert_eq!(section.record.document_number.as_deref(), Some("42/2020"));
        assert_eq!(section.record.village.as_deref(), Some("Kottur"));
        assert!(section.missing_fields.contains(&Field::ExecutionDate));
        assert_eq!(section.normalization, Normalization::Skipped);
    }
}
