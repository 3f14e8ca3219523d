//! Field rule table.
//!
//! Each [`Field`] maps to one label, a value kind, and a capture span.
//! Adjusting a field is an edit to [`RULE_SOURCES`]; extraction has no
//! per-field control flow.

use std::collections::HashMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::transaction::{Field, TransactionRecord};

use super::fields::{self, Span};
use super::patterns::*;

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Date,
    Decimal,
    NameList,
    TokenList,
}

/// A typed value extracted for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Decimal(Decimal),
    List(Vec<String>),
}

/// Extraction rule for one field.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub label: Regex,
    pub kind: ValueKind,
    pub span: Span,
}

impl FieldRule {
    /// Extract this field from normalized section text.
    ///
    /// List fields yield `Some(FieldValue::List(..))` even when empty.
    pub fn extract(&self, text: &str) -> Option<FieldValue> {
        match self.kind {
            ValueKind::Text => fields::extract_string(text, &self.label, self.span).map(FieldValue::Text),
            ValueKind::Date => fields::extract_date(text, &self.label, self.span).map(FieldValue::Date),
            ValueKind::Decimal => {
                fields::extract_decimal(text, &self.label, self.span).map(FieldValue::Decimal)
            }
            ValueKind::NameList => Some(FieldValue::List(fields::extract_names(
                text,
                &self.label,
                self.span,
            ))),
            ValueKind::TokenList => Some(FieldValue::List(fields::extract_tokens(
                text,
                &self.label,
                self.span,
            ))),
        }
    }
}

/// Label source, kind and span for every field, in record order.
pub const RULE_SOURCES: [(Field, &str, ValueKind, Span); 21] = [
    (Field::SerialNumber, SERIAL_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::DocumentNumber, DOCUMENT_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::ExecutionDate, EXECUTION_DATE_LABEL, ValueKind::Date, Span::Line),
    (Field::PresentationDate, PRESENTATION_DATE_LABEL, ValueKind::Date, Span::Line),
    (Field::RegistrationDate, REGISTRATION_DATE_LABEL, ValueKind::Date, Span::Line),
    (Field::Nature, NATURE_LABEL, ValueKind::Text, Span::Line),
    (Field::Executants, EXECUTANTS_LABEL, ValueKind::NameList, Span::Block),
    (Field::Claimants, CLAIMANTS_LABEL, ValueKind::NameList, Span::Block),
    (Field::VolumeNumber, VOLUME_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::PageNumber, PAGE_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::ConsiderationValue, CONSIDERATION_VALUE_LABEL, ValueKind::Decimal, Span::Line),
    (Field::MarketValue, MARKET_VALUE_LABEL, ValueKind::Decimal, Span::Line),
    (Field::PrNumber, PR_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::DocumentRemarks, DOCUMENT_REMARKS_LABEL, ValueKind::Text, Span::Block),
    (Field::PropertyType, PROPERTY_TYPE_LABEL, ValueKind::Text, Span::Line),
    (Field::PropertyExtent, PROPERTY_EXTENT_LABEL, ValueKind::Text, Span::Line),
    (Field::Village, VILLAGE_LABEL, ValueKind::Text, Span::Line),
    (Field::Street, STREET_LABEL, ValueKind::Text, Span::Line),
    (Field::SurveyNumbers, SURVEY_NUMBERS_LABEL, ValueKind::TokenList, Span::Line),
    (Field::PlotNumber, PLOT_NUMBER_LABEL, ValueKind::Text, Span::Token),
    (Field::ScheduleRemarks, SCHEDULE_REMARKS_LABEL, ValueKind::Text, Span::Block),
];

fn label_regex(source: &str) -> Regex {
    Regex::new(&format!(r"(?i)(?:{})[ \t]*:\s*", source)).unwrap()
}

lazy_static! {
    /// Compiled rules, in record order.
    pub static ref RULES: Vec<FieldRule> = RULE_SOURCES
        .iter()
        .map(|(field, source, kind, span)| FieldRule {
            field: *field,
            label: label_regex(source),
            kind: *kind,
            span: *span,
        })
        .collect();

    /// Any known label followed by its separator; values end where one starts.
    pub static ref NEXT_LABEL: Regex = {
        let sources: Vec<&str> = RULE_SOURCES.iter().map(|(_, source, _, _)| *source).collect();
        Regex::new(&format!(r"(?i)(?:{})[ \t]*:", sources.join("|"))).unwrap()
    };
}

/// Look up the rule for a field.
pub fn rule_for(field: Field) -> Option<&'static FieldRule> {
    RULES.iter().find(|rule| rule.field == field)
}

/// Field values extracted from one section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    values: HashMap<Field, FieldValue>,
}

impl ExtractedFields {
    /// Run every rule against normalized section text.
    pub fn from_text(text: &str) -> Self {
        let values = RULES
            .iter()
            .filter_map(|rule| rule.extract(text).map(|value| (rule.field, value)))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    fn text(&mut self, field: Field) -> Option<String> {
        match self.values.remove(&field) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    fn date(&self, field: Field) -> Option<NaiveDate> {
        match self.values.get(&field) {
            Some(FieldValue::Date(value)) => Some(*value),
            _ => None,
        }
    }

    fn decimal(&self, field: Field) -> Option<Decimal> {
        match self.values.get(&field) {
            Some(FieldValue::Decimal(value)) => Some(*value),
            _ => None,
        }
    }

    fn list(&mut self, field: Field) -> Vec<String> {
        match self.values.remove(&field) {
            Some(FieldValue::List(value)) => value,
            _ => Vec::new(),
        }
    }

    /// Build the record, attaching the untranslated section text.
    pub fn into_record(mut self, original_text: impl Into<String>) -> TransactionRecord {
        TransactionRecord {
            serial_number: self.text(Field::SerialNumber),
            document_number: self.text(Field::DocumentNumber),
            execution_date: self.date(Field::ExecutionDate),
            presentation_date: self.date(Field::PresentationDate),
            registration_date: self.date(Field::RegistrationDate),
            nature: self.text(Field::Nature),
            executants: self.list(Field::Executants),
            claimants: self.list(Field::Claimants),
            volume_number: self.text(Field::VolumeNumber),
            page_number: self.text(Field::PageNumber),
            consideration_value: self.decimal(Field::ConsiderationValue),
            market_value: self.decimal(Field::MarketValue),
            pr_number: self.text(Field::PrNumber),
            document_remarks: self.text(Field::DocumentRemarks),
            property_type: self.text(Field::PropertyType),
            property_extent: self.text(Field::PropertyExtent),
            village: self.text(Field::Village),
            street: self.text(Field::Street),
            survey_numbers: self.list(Field::SurveyNumbers),
            plot_number: self.text(Field::PlotNumber),
            schedule_remarks: self.text(Field::ScheduleRemarks),
            original_text: original_text.into(),
        }
    }
}

/// Extract a record from normalized text, keeping `original_text` verbatim.
pub fn extract_record(normalized_text: &str, original_text: &str) -> TransactionRecord {
    ExtractedFields::from_text(normalized_text).into_record(original_text)
}
