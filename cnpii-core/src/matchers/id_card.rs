// cnpii-core/src/matchers/id_card.rs
//! Resident ID number matcher.
//!
//! Primary pass: 18-character runs (lead digit 1-9, then 17 digits or X,
//! single internal whitespace tolerated), bounded by non-alphanumeric
//! context, validated via the GB 11643 checksum. Secondary pass: 19-digit
//! runs under the same boundary rule, handed to the single-inserted-digit
//! OCR repair; a successful repair emits a candidate over the original
//! 19-character range at reduced confidence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::{log_candidate_debug, log_filtered_debug, Candidate, CandidateSource};
use crate::category::Category;
use crate::matchers::{is_bounded, strip_whitespace};
use crate::validators::{is_valid_national_id, repair_inserted_digit};

static ID_18: Lazy<Regex> = Lazy::new(|| Regex::new(r"[1-9](?:\s?[0-9Xx]){17}").unwrap());
static ID_19: Lazy<Regex> = Lazy::new(|| Regex::new(r"[1-9](?:\s?[0-9]){18}").unwrap());

const SCORE_CLEAN: f64 = 0.95;
// Lower than the clean case: a repaired match carries residual OCR doubt.
const SCORE_REPAIRED: f64 = 0.90;

pub fn find_candidates(text: &str) -> Vec<Candidate> {
    let mut results = Vec::new();

    for m in ID_18.find_iter(text) {
        if !is_bounded(text, m.start(), m.end()) {
            continue;
        }
        let cleaned = strip_whitespace(m.as_str());
        if is_valid_national_id(&cleaned) {
            log_candidate_debug(module_path!(), Category::IdCard, m.as_str(), SCORE_CLEAN);
            results.push(Candidate::new(
                Category::IdCard,
                m.start(),
                m.end(),
                SCORE_CLEAN,
                CandidateSource::Pattern,
            ));
        } else {
            log_filtered_debug(module_path!(), Category::IdCard, m.as_str(), "checksum_failed");
        }
    }

    for m in ID_19.find_iter(text) {
        if !is_bounded(text, m.start(), m.end()) {
            continue;
        }
        let cleaned = strip_whitespace(m.as_str());
        match repair_inserted_digit(&cleaned) {
            Some(_) => {
                log_candidate_debug(module_path!(), Category::IdCard, m.as_str(), SCORE_REPAIRED);
                results.push(Candidate::new(
                    Category::IdCard,
                    m.start(),
                    m.end(),
                    SCORE_REPAIRED,
                    CandidateSource::Pattern,
                ));
            }
            None => {
                log_filtered_debug(module_path!(), Category::IdCard, m.as_str(), "repair_failed");
            }
        }
    }

    results
}
