//! Rupee amount parsing for consideration and market values.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::CURRENCY_PREFIX;
use super::{ExtractionMatch, FieldExtractor};

/// Amount value extractor.
///
/// Reads the first token of the text as an amount. A value that is not
/// numeric once separators are removed yields nothing; amounts are never
/// searched for further along the text.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let trimmed = text.trim_start();
        let offset = text.len() - trimmed.len();
        let token = trimmed.split_whitespace().next()?;

        // "Rs. 12,000" splits into a prefix token and the amount
        let token = if CURRENCY_PREFIX.is_match(token) && CURRENCY_PREFIX.replace(token, "").is_empty() {
            trimmed.split_whitespace().nth(1)?
        } else {
            token
        };

        let amount = parse_rupee_amount(token)?;
        let start = offset + trimmed.find(token).unwrap_or(0);
        Some(ExtractionMatch::new(amount, token).with_position(start, start + token.len()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Parse an amount such as "12,345", "1,25,000.50", "Rs.5000" or "5000/-".
///
/// Thousands separators are stripped before parsing. Negative or
/// non-numeric values yield `None`.
pub fn parse_rupee_amount(s: &str) -> Option<Decimal> {
    let without_prefix = CURRENCY_PREFIX.replace(s.trim(), "");
    let cleaned: String = without_prefix
        .trim_end_matches("/-")
        .trim_end_matches(['.', ','])
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    Decimal::from_str(&cleaned)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
}

/// Format an amount with Indian digit grouping (12,34,567.00).
pub fn format_rupee_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => return s,
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Last three digits form one group, the rest are grouped in pairs
    let formatted = if digits.len() <= 3 {
        digits.to_string()
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let chars: Vec<char> = head.chars().collect();
        let mut grouped = String::new();
        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        format!("{},{}", grouped, tail)
    };

    format!("{}{}.{}", sign, formatted, decimal_part)
}
