//! Party-name and survey-number list splitting.

use super::patterns::{ORDINAL_MARKER, WHITESPACE_RUN};

/// Split a numbered party list ("1. Raman 2. Kumar") into names.
///
/// Text without ordinal markers is treated as a single name. Names that
/// wrap across lines are joined with single spaces.
pub fn split_names(text: &str) -> Vec<String> {
    ORDINAL_MARKER
        .split(text)
        .map(clean_entry)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Split a comma separated token list ("12/3, 45") into tokens.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(|token| token.trim().trim_end_matches(['.', ';']).trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn clean_entry(entry: &str) -> String {
    WHITESPACE_RUN
        .replace_all(entry.trim(), " ")
        .trim_end_matches([',', ';'])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_numbered_names() {
        assert_eq!(split_names("1. Raman 2. Kumar"), vec!["Raman", "Kumar"]);
        assert_eq!(split_names("1.Raman\n2.Kumar"), vec!["Raman", "Kumar"]);
        assert_eq!(split_names("1. Lakshmi, 2. Devi"), vec!["Lakshmi", "Devi"]);
    }

    #[test]
    fn test_parenthesised_numbers_stay_in_name() {
        assert_eq!(
            split_names("1. Raman (Age 45) 2. Kumar"),
            vec!["Raman (Age 45)", "Kumar"]
        );
    }

    #[test]
    fn test_split_joins_wrapped_names() {
        assert_eq!(
            split_names("1. Raman\n   S/o Krishnan 2. Kumar"),
            vec!["Raman S/o Krishnan", "Kumar"]
        );
    }

    #[test]
    fn test_split_unnumbered_single_name() {
        assert_eq!(split_names("Meenakshi Ammal"), vec!["Meenakshi Ammal"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_names("").is_empty());
        assert!(split_names("  1.  ").is_empty());
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(split_tokens("12/3, 45"), vec!["12/3", "45"]);
        assert_eq!(split_tokens("101/2A,102 , ,103."), vec!["101/2A", "102", "103"]);
        assert!(split_tokens(" ").is_empty());
    }
}
