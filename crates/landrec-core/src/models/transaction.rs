//! Transaction record models for land-registration documents.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One registered transaction extracted from a document section.
///
/// Every field except `original_text` is independently optional. A record
/// has no identity until it is handed to a [`RecordSink`](crate::store::RecordSink).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Serial number of the entry ("Sr. No.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Registered document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Date the document was executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_date: Option<NaiveDate>,

    /// Date the document was presented for registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_date: Option<NaiveDate>,

    /// Date of registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<NaiveDate>,

    /// Nature of the transaction (sale, mortgage, settlement...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,

    /// Parties executing the document, in listed order.
    #[serde(default)]
    pub executants: Vec<String>,

    /// Parties claiming under the document, in listed order.
    #[serde(default)]
    pub claimants: Vec<String>,

    /// Register volume number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_number: Option<String>,

    /// Register page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<String>,

    /// Consideration value stated in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consideration_value: Option<Decimal>,

    /// Guideline market value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,

    /// Previous registration reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<String>,

    /// Free-form document remarks, possibly multi-line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_remarks: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_extent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// Survey numbers, in listed order.
    #[serde(default)]
    pub survey_numbers: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_number: Option<String>,

    /// Free-form schedule remarks, possibly multi-line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_remarks: Option<String>,

    /// Section text exactly as it appeared in the source, before translation.
    pub original_text: String,
}

impl TransactionRecord {
    /// Fields that carry no value in this record.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|field| !self.has(*field))
            .collect()
    }

    /// Whether the given field carries a value.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::SerialNumber => self.serial_number.is_some(),
            Field::DocumentNumber => self.document_number.is_some(),
            Field::ExecutionDate => self.execution_date.is_some(),
            Field::PresentationDate => self.presentation_date.is_some(),
            Field::RegistrationDate => self.registration_date.is_some(),
            Field::Nature => self.nature.is_some(),
            Field::Executants => !self.executants.is_empty(),
            Field::Claimants => !self.claimants.is_empty(),
            Field::VolumeNumber => self.volume_number.is_some(),
            Field::PageNumber => self.page_number.is_some(),
            Field::ConsiderationValue => self.consideration_value.is_some(),
            Field::MarketValue => self.market_value.is_some(),
            Field::PrNumber => self.pr_number.is_some(),
            Field::DocumentRemarks => self.document_remarks.is_some(),
            Field::PropertyType => self.property_type.is_some(),
            Field::PropertyExtent => self.property_extent.is_some(),
            Field::Village => self.village.is_some(),
            Field::Street => self.street.is_some(),
            Field::SurveyNumbers => !self.survey_numbers.is_empty(),
            Field::PlotNumber => self.plot_number.is_some(),
            Field::ScheduleRemarks => self.schedule_remarks.is_some(),
        }
    }

    /// Field value rendered as a single string, lists joined with "; ".
    pub fn display_value(&self, field: Field) -> Option<String> {
        fn text(value: &Option<String>) -> Option<String> {
            value.clone()
        }
        fn list(values: &[String]) -> Option<String> {
            (!values.is_empty()).then(|| values.join("; "))
        }

        match field {
            Field::SerialNumber => text(&self.serial_number),
            Field::DocumentNumber => text(&self.document_number),
            Field::ExecutionDate => self.execution_date.map(|d| d.to_string()),
            Field::PresentationDate => self.presentation_date.map(|d| d.to_string()),
            Field::RegistrationDate => self.registration_date.map(|d| d.to_string()),
            Field::Nature => text(&self.nature),
            Field::Executants => list(&self.executants),
            Field::Claimants => list(&self.claimants),
            Field::VolumeNumber => text(&self.volume_number),
            Field::PageNumber => text(&self.page_number),
            Field::ConsiderationValue => self.consideration_value.map(|v| v.to_string()),
            Field::MarketValue => self.market_value.map(|v| v.to_string()),
            Field::PrNumber => text(&self.pr_number),
            Field::DocumentRemarks => text(&self.document_remarks),
            Field::PropertyType => text(&self.property_type),
            Field::PropertyExtent => text(&self.property_extent),
            Field::Village => text(&self.village),
            Field::Street => text(&self.street),
            Field::SurveyNumbers => list(&self.survey_numbers),
            Field::PlotNumber => text(&self.plot_number),
            Field::ScheduleRemarks => text(&self.schedule_remarks),
        }
    }
}

/// Extractable fields of a [`TransactionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SerialNumber,
    DocumentNumber,
    ExecutionDate,
    PresentationDate,
    RegistrationDate,
    Nature,
    Executants,
    Claimants,
    VolumeNumber,
    PageNumber,
    ConsiderationValue,
    MarketValue,
    PrNumber,
    DocumentRemarks,
    PropertyType,
    PropertyExtent,
    Village,
    Street,
    SurveyNumbers,
    PlotNumber,
    ScheduleRemarks,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Field; 21] = [
        Field::SerialNumber,
        Field::DocumentNumber,
        Field::ExecutionDate,
        Field::PresentationDate,
        Field::RegistrationDate,
        Field::Nature,
        Field::Executants,
        Field::Claimants,
        Field::VolumeNumber,
        Field::PageNumber,
        Field::ConsiderationValue,
        Field::MarketValue,
        Field::PrNumber,
        Field::DocumentRemarks,
        Field::PropertyType,
        Field::PropertyExtent,
        Field::Village,
        Field::Street,
        Field::SurveyNumbers,
        Field::PlotNumber,
        Field::ScheduleRemarks,
    ];

    /// Stable snake_case name, matching the serialized record key.
    pub fn name(&self) -> &'static str {
        match self {
            Field::SerialNumber => "serial_number",
            Field::DocumentNumber => "document_number",
            Field::ExecutionDate => "execution_date",
            Field::PresentationDate => "presentation_date",
            Field::RegistrationDate => "registration_date",
            Field::Nature => "nature",
            Field::Executants => "executants",
            Field::Claimants => "claimants",
            Field::VolumeNumber => "volume_number",
            Field::PageNumber => "page_number",
            Field::ConsiderationValue => "consideration_value",
            Field::MarketValue => "market_value",
            Field::PrNumber => "pr_number",
            Field::DocumentRemarks => "document_remarks",
            Field::PropertyType => "property_type",
            Field::PropertyExtent => "property_extent",
            Field::Village => "village",
            Field::Street => "street",
            Field::SurveyNumbers => "survey_numbers",
            Field::PlotNumber => "plot_number",
            Field::ScheduleRemarks => "schedule_remarks",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A transaction record after it has been accepted by a record sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTransaction {
    /// Identifier assigned by the sink.
    pub id: u64,

    /// Extracted record.
    #[serde(flatten)]
    pub record: TransactionRecord,

    /// When the sink accepted the record.
    pub created_at: DateTime<Utc>,

    /// Owner the record was saved for.
    pub created_by: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_missing_fields_on_empty_record() {
        let record = TransactionRecord::default();
        assert_eq!(record.missing_fields().len(), Field::ALL.len());
    }

    #[test]
    fn test_missing_fields_skips_populated() {
        let record = TransactionRecord {
            document_number: Some("1234/2019".to_string()),
            claimants: vec!["Raman".to_string()],
            ..Default::default()
        };

        let missing = record.missing_fields();
        assert!(!missing.contains(&Field::DocumentNumber));
        assert!(!missing.contains(&Field::Claimants));
        assert!(missing.contains(&Field::Executants));
    }

    #[test]
    fn test_record_serialization_skips_absent() {
        let record = TransactionRecord {
            market_value: Some(Decimal::from_str("125000").unwrap()),
            execution_date: NaiveDate::from_ymd_opt(2019, 3, 14),
            original_text: "Sr. No. : 1".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["market_value"], "125000");
        assert_eq!(json["execution_date"], "2019-03-14");
        assert_eq!(json["executants"], serde_json::json!([]));
        assert!(json.get("village").is_none());
    }

    #[test]
    fn test_display_value() {
        let record = TransactionRecord {
            survey_numbers: vec!["12/3".to_string(), "45".to_string()],
            registration_date: NaiveDate::from_ymd_opt(2019, 3, 15),
            ..Default::default()
        };

        assert_eq!(record.display_value(Field::SurveyNumbers).as_deref(), Some("12/3; 45"));
        assert_eq!(record.display_value(Field::RegistrationDate).as_deref(), Some("2019-03-15"));
        assert_eq!(record.display_value(Field::Claimants), None);
    }

    #[test]
    fn test_field_names_match_serialized_keys() {
        for field in Field::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, field.name());
        }
    }
}
