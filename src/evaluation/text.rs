//! Lexical helpers shared by the scorers.
//!
//! All matching is plain substring matching on case-folded text. There are
//! no word boundaries: "dos" inside "kudos" counts.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").unwrap());
static DECIMAL_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());
static PORT_CLAIM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bports?\s+([0-9]{1,5})\b").unwrap());

/// Every unsigned decimal number in `text`, in order of appearance.
///
/// "v2.1" yields `2.1`, "item 3." yields `3.0`; context is ignored. Digits
/// from any script count, so "١٢٠" and "１２０" both yield `120.0`.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|m| to_ascii_number(m.as_str()).parse::<f64>().ok())
        .collect()
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || DECIMAL_DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Numeric value of a Unicode decimal digit.
///
/// Decimal digits are encoded as contiguous runs of ten starting at zero,
/// so the value is the offset from the start of the run, modulo ten.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

fn to_ascii_number(matched: &str) -> String {
    matched
        .chars()
        .map(|c| {
            decimal_digit_value(c)
                .and_then(|d| char::from_digit(d, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Port numbers claimed in phrases such as "port 22" or "ports 8080".
pub fn extract_port_claims(text: &str) -> Vec<u16> {
    PORT_CLAIM_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<u16>().ok())
        .collect()
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Summed occurrences of every keyword.
pub fn count_all(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().map(|kw| count_occurrences(haystack, kw)).sum()
}

/// True if any keyword occurs in `haystack`.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numbers_integers_and_decimals() {
        assert_eq!(
            extract_numbers("This cluster has 120 records with max packets of 120."),
            vec![120.0, 120.0]
        );
        assert_eq!(extract_numbers("mean 5.25 bytes, lof 3.2"), vec![5.25, 3.2]);
    }

    #[test]
    fn test_extract_numbers_is_lexical() {
        // List indices and version strings count like any other number.
        assert_eq!(extract_numbers("1. block 192.168.100.4"), vec![1.0, 192.168, 100.4]);
        assert_eq!(extract_numbers("-7"), vec![7.0]);
        assert!(extract_numbers("no digits here").is_empty());
    }

    #[test]
    fn test_extract_numbers_pulls_digits_out_of_identifiers() {
        assert_eq!(extract_numbers("c2 beacon"), vec![2.0]);
        assert_eq!(extract_numbers("C2 over TCP port 80"), vec![2.0, 80.0]);
    }

    #[test]
    fn test_extract_numbers_normalizes_non_ascii_digits() {
        // Arabic-Indic and full-width forms of 120.
        assert_eq!(
            extract_numbers("\u{0661}\u{0662}\u{0660} records, \u{FF11}\u{FF12}\u{FF10}"),
            vec![120.0, 120.0]
        );
        // Devanagari 3.5: the run starts at U+0966, not on a 16-aligned boundary.
        assert_eq!(extract_numbers("\u{0969}.\u{096B}"), vec![3.5]);
        // Mathematical digit runs sit back to back; each run restarts at zero.
        assert_eq!(extract_numbers("\u{1D7CF}\u{1D7DC}"), vec![14.0]);
    }

    #[test]
    fn test_extract_port_claims() {
        assert_eq!(
            extract_port_claims("Traffic on Port 22 and ports 8080, not 99999 port 70000"),
            vec![22, 8080]
        );
    }

    #[test]
    fn test_count_occurrences_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("scanning scan", "scan"), 2);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_count_all_and_contains_any() {
        assert_eq!(count_all("tcp udp tcp", &["tcp", "udp"]), 3);
        assert!(contains_any("please monitor", &["block", "monitor"]));
        assert!(!contains_any("nothing", &["block", "monitor"]));
    }
}
