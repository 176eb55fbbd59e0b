// cnpii-core/src/matchers/phone.rs
//! Mainland-China mobile number matcher.
//!
//! Recognizes bare 11-digit numbers, `+86`/`0086`-prefixed numbers, and
//! single-space/hyphen separated groupings. A phone-shaped hit embedded in
//! a longer digit run is discarded when that run independently reads as a
//! resident ID or a bank card number; those categories own the digits.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::{log_filtered_debug, Candidate, CandidateSource};
use crate::category::Category;
use crate::matchers::keep_highest_disjoint;
use crate::validators::is_valid_national_id;

static PREFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+86|0086)1[3-9][0-9]{9}").unwrap());
static BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"1[3-9][0-9]{9}").unwrap());
static SEPARATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+86|0086)?1[3-9][0-9][\s-]?[0-9]{4}[\s-]?[0-9]{4}").unwrap());

pub fn find_candidates(text: &str) -> Vec<Candidate> {
    let patterns: [(&Regex, f64); 3] = [(&*PREFIXED, 0.90), (&*BARE, 0.85), (&*SEPARATED, 0.75)];
    let mut results = Vec::new();

    for (pattern, score) in patterns {
        for m in pattern.find_iter(text) {
            if !is_valid_phone(m.as_str()) {
                continue;
            }
            if embedded_in_valid_id(text, m.start(), m.end()) {
                log_filtered_debug(module_path!(), Category::Phone, m.as_str(), "id_card_substring");
                continue;
            }
            if embedded_in_card_run(text, m.start(), m.end()) {
                log_filtered_debug(module_path!(), Category::Phone, m.as_str(), "bank_card_substring");
                continue;
            }
            results.push(Candidate::new(
                Category::Phone,
                m.start(),
                m.end(),
                score,
                CandidateSource::Pattern,
            ));
        }
    }

    keep_highest_disjoint(results)
}

/// Normalizes separators and country prefix, then checks the 11-digit
/// mobile shape: leading `1`, second digit 3-9.
fn is_valid_phone(raw: &str) -> bool {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect();
    let local = digits
        .strip_prefix("0086")
        .or_else(|| digits.strip_prefix("86"))
        .unwrap_or(&digits);

    if local.len() != 11 || !local.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let bytes = local.as_bytes();
    bytes[0] == b'1' && (b'3'..=b'9').contains(&bytes[1])
}

/// True when some 18-character window of the digit/X run surrounding the
/// match passes the resident-ID checksum — the phone-shaped hit is then a
/// substring of a real ID number.
fn embedded_in_valid_id(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();

    let mut run_start = start;
    while run_start > 0 && bytes[run_start - 1].is_ascii_digit() {
        run_start -= 1;
    }
    let mut run_end = end;
    while run_end < bytes.len()
        && (bytes[run_end].is_ascii_digit() || bytes[run_end] == b'X' || bytes[run_end] == b'x')
    {
        run_end += 1;
    }

    let run_len = run_end - run_start;
    if run_len < 18 || run_len == end - start {
        return false;
    }

    for window_start in run_start..=(run_end - 18) {
        let window_end = window_start + 18;
        if window_start <= start
            && window_end >= end
            && is_valid_national_id(&text[window_start..window_end])
        {
            return true;
        }
    }
    false
}

/// True when the digits immediately adjacent to the match total 5 or more:
/// an 11-digit hit inside a >=16-digit run is bank-card territory, not a
/// phone number.
fn embedded_in_card_run(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();

    let mut prefix_digits = 0usize;
    let mut i = start;
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        prefix_digits += 1;
        i -= 1;
    }

    let mut suffix_digits = 0usize;
    let mut j = end;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        suffix_digits += 1;
        j += 1;
    }

    prefix_digits + suffix_digits >= 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number() {
        let text = "我的手机号是13812345678，谢谢";
        let found = find_candidates(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "13812345678");
        assert!((found[0].score - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prefixed_number_wins_over_bare_submatch() {
        let text = "+8613812345678";
        let found = find_candidates(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 0);
        assert!((found[0].score - 0.90).abs() < f64::EPSILON);
    }

    #[test]
    fn test_separated_number() {
        let text = "联系电话 138-1234-5678";
        let found = find_candidates(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "138-1234-5678");
        assert!((found[0].score - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_second_digit_out_of_range_rejected() {
        assert!(find_candidates("12012345678").is_empty());
    }

    #[test]
    fn test_suppressed_inside_valid_id() {
        // "19491231002" is phone-shaped but sits inside a checksum-valid ID.
        let text = "身份证号11010519491231002X";
        assert!(find_candidates(text).is_empty());
    }

    #[test]
    fn test_suppressed_inside_long_digit_run() {
        // 11-digit hit embedded in a 19-digit run: adjacent digits >= 5.
        let text = "卡号6222130123456789012";
        assert!(find_candidates(text).is_empty());
    }

    #[test]
    fn test_not_suppressed_with_short_neighbors() {
        // Two stray digits next door are not enough to reclassify.
        let text = "编号9 13812345678";
        let found = find_candidates(text);
        assert_eq!(found.len(), 1);
    }
}
