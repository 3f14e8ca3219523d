//! Date parsing for registration entries.

use chrono::NaiveDate;

use super::patterns::{DATE_DAY_MONTH_NAME, DATE_DMY, DATE_YMD};
use super::{ExtractionMatch, FieldExtractor};

/// Date value extractor.
///
/// Numeric dates are read day first, as the registration offices write
/// them.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // YYYY-MM-DD or YYYY/MM/DD
        for caps in DATE_YMD.captures_iter(text) {
            let year: i32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let day: u32 = caps[3].parse().unwrap_or(0);

            if let (Some(date), Some(whole)) = (NaiveDate::from_ymd_opt(year, month, day), caps.get(0)) {
                results.push(
                    ExtractionMatch::new(date, whole.as_str()).with_position(whole.start(), whole.end()),
                );
            }
        }

        // DD-MM-YYYY, DD/MM/YYYY, DD.MM.YY
        for caps in DATE_DMY.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year = parse_year(&caps[3]);

            if let (Some(date), Some(whole)) = (NaiveDate::from_ymd_opt(year, month, day), caps.get(0)) {
                results.push(
                    ExtractionMatch::new(date, whole.as_str()).with_position(whole.start(), whole.end()),
                );
            }
        }

        // 15-Mar-2019, 15 March 2019
        for caps in DATE_DAY_MONTH_NAME.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = month_to_number(&caps[2]);
            let year = parse_year(&caps[3]);

            if let (Some(date), Some(whole)) = (NaiveDate::from_ymd_opt(year, month, day), caps.get(0)) {
                results.push(
                    ExtractionMatch::new(date, whole.as_str()).with_position(whole.start(), whole.end()),
                );
            }
        }

        results.sort_by_key(|m| m.position.map(|(start, _)| start).unwrap_or(usize::MAX));
        results
    }
}

/// Parse the first date in `text`, or `None` if there is none.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if s.len() <= 2 {
        // Two-digit year: 00-50 is 2000s, 51-99 is 1900s
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn month_to_number(month: &str) -> u32 {
    match month.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}
