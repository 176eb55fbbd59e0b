// cnpii-core/src/matchers/bank_card.rs
//! Bank card number matcher.
//!
//! 16-19 digit runs, bounded by non-alphanumeric context, whitespace
//! tolerated inside the run, validated with the Luhn checksum. A match
//! whose prefix hits the issuer BIN table scores higher than an anonymous
//! Luhn-valid run.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::candidate::{log_candidate_debug, log_filtered_debug, Candidate, CandidateSource};
use crate::category::Category;
use crate::matchers::{is_bounded, strip_whitespace};
use crate::validators::is_valid_bank_card;

static CARD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9](?:\s?[0-9]){15,18}").unwrap());

// Issuer identification numbers commonly seen on mainland cards.
static BANK_BIN_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (issuer, bins) in [
        ("工商银行", &["622202", "622203", "622208", "621225", "621226"][..]),
        ("农业银行", &["622848", "622849", "622845", "622846"][..]),
        ("中国银行", &["621660", "621661", "621663", "621665"][..]),
        ("建设银行", &["621700", "436742", "436745", "622280"][..]),
        ("交通银行", &["622260", "622261", "622262"][..]),
        ("招商银行", &["622580", "622588", "621286", "621483"][..]),
        ("浦发银行", &["622518", "622520", "622521", "622522"][..]),
        ("民生银行", &["622615", "622617", "622618", "622622"][..]),
        ("兴业银行", &["622909", "622910", "622911", "622912"][..]),
        ("平安银行", &["622155", "622156", "622157", "622158"][..]),
        ("光大银行", &["622660", "622661", "622662", "622663"][..]),
        ("华夏银行", &["622630", "622631", "622632"][..]),
        ("广发银行", &["622568", "622569", "622570"][..]),
        ("中信银行", &["622690", "622691", "622692"][..]),
        ("邮储银行", &["622188", "622199", "622810"][..]),
    ] {
        for bin in bins {
            map.insert(*bin, issuer);
        }
    }
    map
});

const SCORE_BASE: f64 = 0.7;
const SCORE_KNOWN_ISSUER: f64 = 0.95;

pub fn find_candidates(text: &str) -> Vec<Candidate> {
    let mut results = Vec::new();

    for m in CARD_RUN.find_iter(text) {
        if !is_bounded(text, m.start(), m.end()) {
            continue;
        }
        let cleaned = strip_whitespace(m.as_str());
        if !is_valid_bank_card(&cleaned) {
            log_filtered_debug(module_path!(), Category::BankCard, m.as_str(), "luhn_failed");
            continue;
        }
        let score = if issuer_for(&cleaned).is_some() {
            SCORE_KNOWN_ISSUER
        } else {
            SCORE_BASE
        };
        log_candidate_debug(module_path!(), Category::BankCard, m.as_str(), score);
        results.push(Candidate::new(
            Category::BankCard,
            m.start(),
            m.end(),
            score,
            CandidateSource::Pattern,
        ));
    }

    results
}

/// Looks up the issuing bank for a cleaned (digits-only) card number.
pub fn issuer_for(card_number: &str) -> Option<&'static str> {
    if card_number.len() < 6 {
        return None;
    }
    BANK_BIN_CODES.get(&card_number[..6]).copied()
}
