//! Search criteria over persisted transactions.

use serde::{Deserialize, Serialize};

use crate::models::transaction::TransactionRecord;

/// Criteria a transaction must meet; unset criteria match everything.
///
/// Party and survey criteria match a case-insensitive substring of any
/// list entry. Plot and document numbers must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// Substring of a claimant name.
    pub buyer: Option<String>,
    /// Substring of an executant name.
    pub seller: Option<String>,
    /// Substring of a survey number.
    pub survey_number: Option<String>,
    /// Exact plot number.
    pub plot_number: Option<String>,
    /// Exact document number.
    pub document_number: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buyer(mut self, buyer: impl Into<String>) -> Self {
        self.buyer = Some(buyer.into());
        self
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    pub fn with_survey_number(mut self, survey_number: impl Into<String>) -> Self {
        self.survey_number = Some(survey_number.into());
        self
    }

    pub fn with_plot_number(mut self, plot_number: impl Into<String>) -> Self {
        self.plot_number = Some(plot_number.into());
        self
    }

    pub fn with_document_number(mut self, document_number: impl Into<String>) -> Self {
        self.document_number = Some(document_number.into());
        self
    }

    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.buyer.is_none()
            && self.seller.is_none()
            && self.survey_number.is_none()
            && self.plot_number.is_none()
            && self.document_number.is_none()
    }

    /// Check a record against every set criterion.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        contains_any(&record.claimants, self.buyer.as_deref())
            && contains_any(&record.executants, self.seller.as_deref())
            && contains_any(&record.survey_numbers, self.survey_number.as_deref())
            && equals(record.plot_number.as_deref(), self.plot_number.as_deref())
            && equals(record.document_number.as_deref(), self.document_number.as_deref())
    }
}

fn contains_any(values: &[String], needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let needle = needle.to_lowercase();
    values.iter().any(|value| value.to_lowercase().contains(&needle))
}

fn equals(value: Option<&str>, expected: Option<&str>) -> bool {
    match expected {
        Some(expected) => value == Some(expected),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TransactionRecord {
        TransactionRecord {
            document_number: Some("1234/2019".to_string()),
            plot_number: Some("7A".to_string()),
            executants: vec!["Raman".to_string(), "Kumar".to_string()],
            claimants: vec!["Lakshmi Devi".to_string()],
            survey_numbers: vec!["12/3".to_string(), "45".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(TransactionFilter::new().is_empty());
        assert!(TransactionFilter::new().matches(&record()));
        assert!(TransactionFilter::new().matches(&TransactionRecord::default()));
    }

    #[test]
    fn test_party_substring_case_insensitive() {
        assert!(TransactionFilter::new().with_buyer("lakshmi").matches(&record()));
        assert!(TransactionFilter::new().with_seller("KUM").matches(&record()));
        assert!(!TransactionFilter::new().with_buyer("Raman").matches(&record()));
    }

    #[test]
    fn test_survey_substring() {
        assert!(TransactionFilter::new().with_survey_number("12/").matches(&record()));
        assert!(!TransactionFilter::new().with_survey_number("99").matches(&record()));
    }

    #[test]
    fn test_exact_numbers() {
        assert!(TransactionFilter::new().with_plot_number("7A").matches(&record()));
        assert!(!TransactionFilter::new().with_plot_number("7").matches(&record()));
        assert!(
            TransactionFilter::new()
                .with_document_number("1234/2019")
                .matches(&record())
        );
        assert!(
            !TransactionFilter::new()
                .with_document_number("1234/2019")
                .matches(&TransactionRecord::default())
        );
    }

    #[test]
    fn test_all_criteria_must_hold() {
        let filter = TransactionFilter::new().with_buyer("Lakshmi").with_plot_number("8");
        assert!(!filter.matches(&record()));
    }
}
