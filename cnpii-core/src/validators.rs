// File: cnpii-core/src/validators.rs
//! Programmatic validation functions for specific PII data types.
//!
//! This module provides additional validation logic beyond regular expression
//! matching for numeric identifiers such as bank card numbers and resident ID
//! numbers. These functions help reduce false positives by applying checksum,
//! region-code, and date-plausibility checks. All functions are pure: they
//! signal "invalid" through their return value and never panic on bad input.
//!
//! License: MIT OR APACHE 2.0

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Validates a number using the Luhn algorithm.
///
/// The Luhn algorithm, also known as the Mod 10 algorithm, is a simple
/// checksum formula used to validate a variety of identification numbers,
/// such as payment card numbers.
///
/// # Arguments
///
/// * `num_str` - A string slice containing only digits.
///
/// # Returns
///
/// `true` if the number is valid according to the Luhn algorithm, `false`
/// otherwise (including when any non-digit character is present).
pub fn is_valid_luhn(num_str: &str) -> bool {
    if num_str.is_empty() {
        return false;
    }

    let mut sum = 0;
    let mut alternate = false;

    for c in num_str.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else { return false; };

        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Helper for bank card numbers: strips whitespace, then requires a
/// 16-19 digit string that passes the Luhn check.
pub fn is_valid_bank_card(card_number: &str) -> bool {
    let digits: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() < 16 || digits.len() > 19 {
        return false;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    is_valid_luhn(&digits)
}

// GB/T 2260 province-level prefixes that can legally start a resident ID.
static REGION_CODES: Lazy<HashSet<u32>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        11, 12, 13, 14, 15, // 华北
        21, 22, 23, // 东北
        31, 32, 33, 34, 35, 36, 37, // 华东
        41, 42, 43, 44, 45, 46, // 中南
        50, 51, 52, 53, 54, // 西南
        61, 62, 63, 64, 65, // 西北
        71, 81, 82, // 台湾/香港/澳门
    ]);
    set
});

const ID_CHECKSUM_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
const ID_CHECK_CODES: &[u8; 11] = b"10X98765432";

/// Validates an 18-character Chinese resident ID number (GB 11643 style).
///
/// Checks, in order: structure (17 digits plus a digit-or-X check
/// character), the two-digit region prefix against the fixed province
/// table, the embedded `YYYYMMDD` birth date (plausible year, real
/// calendar date, not in the future), and finally the weighted mod-11
/// check digit. The check character is compared case-insensitively.
pub fn is_valid_national_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 18 {
        return false;
    }
    if bytes[0] == b'0' {
        return false;
    }
    if !bytes[..17].iter().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let check_char = bytes[17].to_ascii_uppercase();
    if !(check_char.is_ascii_digit() || check_char == b'X') {
        return false;
    }

    let region: u32 = (bytes[0] - b'0') as u32 * 10 + (bytes[1] - b'0') as u32;
    if !REGION_CODES.contains(&region) {
        return false;
    }

    if !is_plausible_birth_date(&id[6..14]) {
        return false;
    }

    let total: u32 = bytes[..17]
        .iter()
        .zip(ID_CHECKSUM_WEIGHTS.iter())
        .map(|(b, w)| (b - b'0') as u32 * w)
        .sum();
    let expected = ID_CHECK_CODES[(total % 11) as usize];

    check_char == expected
}

/// Validates an 8-character `YYYYMMDD` birth-date field.
fn is_plausible_birth_date(date_str: &str) -> bool {
    debug_assert_eq!(date_str.len(), 8);

    let Ok(year) = date_str[..4].parse::<i32>() else { return false; };
    let Ok(month) = date_str[4..6].parse::<u32>() else { return false; };
    let Ok(day) = date_str[6..8].parse::<u32>() else { return false; };

    let today = Utc::now().date_naive();
    if year < 1900 || year > today.year() {
        return false;
    }

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date <= today,
        None => false,
    }
}

// Insertion-point search order for `repair_inserted_digit`. The start of
// the embedded birth date (positions 6-8) is empirically where OCR inserts
// a spurious digit most often, so those positions are tried first.
const REPAIR_PRIORITY_POSITIONS: [usize; 3] = [6, 7, 8];

/// Attempts to repair a 19-digit run that looks like a resident ID with one
/// spuriously inserted digit (a known OCR failure mode).
///
/// Tries removing each single digit position — positions 6, 7, 8 first,
/// then the remaining positions in ascending order — and re-validates the
/// resulting 18-character string. Returns the first reconstruction that
/// passes `is_valid_national_id`, or `None` if no deletion yields a valid
/// ID. When several reconstructions would validate, the search order makes
/// the result deterministic; it is not guaranteed to be the pre-corruption
/// original.
pub fn repair_inserted_digit(digits: &str) -> Option<String> {
    let bytes = digits.as_bytes();
    if bytes.len() != 19 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if bytes[0] == b'0' {
        return None;
    }

    let positions = REPAIR_PRIORITY_POSITIONS
        .iter()
        .copied()
        .chain((0..19).filter(|p| !REPAIR_PRIORITY_POSITIONS.contains(p)));

    for pos in positions {
        let mut candidate = String::with_capacity(18);
        candidate.push_str(&digits[..pos]);
        candidate.push_str(&digits[pos + 1..]);
        if is_valid_national_id(&candidate) {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // Checksum-valid resident IDs used throughout the test suite.
    const VALID_ID_X: &str = "11010519491231002X";
    const VALID_ID_DIGITS: &str = "110105194912310003";
    const VALID_ID_B: &str = "320381198106215006";

    #[test]
    fn test_luhn_known_valid() {
        assert!(is_valid_luhn("4111111111111111"));
        assert!(is_valid_luhn("6222021234567890128"));
    }

    #[test]
    fn test_luhn_last_digit_flip_invalidates() {
        // Incrementing the check digit mod 10 must break the checksum.
        let valid = "4111111111111111";
        let mut broken: Vec<u8> = valid.bytes().collect();
        let last = broken.last_mut().unwrap();
        *last = b'0' + ((*last - b'0' + 1) % 10);
        let broken = String::from_utf8(broken).unwrap();
        assert!(!is_valid_luhn(&broken));
    }

    #[test]
    fn test_luhn_rejects_non_digits() {
        assert!(!is_valid_luhn(""));
        assert!(!is_valid_luhn("4111-1111-1111-1111"));
    }

    #[test]
    fn test_bank_card_length_bounds() {
        assert!(is_valid_bank_card("4111111111111111"));
        assert!(is_valid_bank_card("6222 0212 3456 7890 128"));
        // Luhn-valid but too short (15 digits, Amex-style).
        assert!(!is_valid_bank_card("378282246310005"));
    }

    #[test]
    fn test_national_id_valid() {
        assert!(is_valid_national_id(VALID_ID_X));
        assert!(is_valid_national_id(VALID_ID_DIGITS));
        assert!(is_valid_national_id(VALID_ID_B));
        // Check character is case-insensitive.
        assert!(is_valid_national_id("11010519491231002x"));
    }

    #[test]
    fn test_national_id_bad_check_digit() {
        assert!(!is_valid_national_id("110105194912310004"));
        assert!(!is_valid_national_id("110101199001011234"));
    }

    #[test]
    fn test_national_id_bad_region() {
        // 99 is not a province prefix; digits otherwise well-formed.
        assert!(!is_valid_national_id("990105194912310003"));
    }

    #[test]
    fn test_national_id_bad_date() {
        // Month 13.
        assert!(!is_valid_national_id("110105194913310003"));
        // February 30th.
        assert!(!is_valid_national_id("110105194902300003"));
        // Future year.
        assert!(!is_valid_national_id("110105299912310003"));
    }

    #[test]
    fn test_national_id_wrong_length() {
        assert!(!is_valid_national_id("1101051949123100"));
        assert!(!is_valid_national_id("11010519491231002X9"));
    }

    #[test]
    fn test_repair_recovers_insertion_in_date_field() {
        // Insert a digit at position 7 (inside the birth date).
        let corrupted = format!("{}9{}", &VALID_ID_B[..7], &VALID_ID_B[7..]);
        assert_eq!(corrupted.len(), 19);
        let repaired = repair_inserted_digit(&corrupted).expect("repair should succeed");
        assert!(is_valid_national_id(&repaired));
        assert_eq!(repaired, VALID_ID_B);
    }

    #[test]
    fn test_repair_falls_back_to_remaining_positions() {
        // Insertion at position 0 is only reachable through the fallback scan.
        let corrupted = format!("9{VALID_ID_B}");
        let repaired = repair_inserted_digit(&corrupted).expect("repair should succeed");
        assert!(is_valid_national_id(&repaired));
    }

    #[test]
    fn test_repair_gives_up_on_garbage() {
        assert_eq!(repair_inserted_digit("9999999999999999999"), None);
        // Wrong length.
        assert_eq!(repair_inserted_digit(VALID_ID_B), None);
        // Non-digit content.
        assert_eq!(repair_inserted_digit("110105194912310029X"), None);
    }
}
