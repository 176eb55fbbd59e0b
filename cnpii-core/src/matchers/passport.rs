// cnpii-core/src/matchers/passport.rs
//! Passport / travel permit number matcher.
//!
//! No checksum exists for this category, so confidence rests on how
//! specific the shape is: the new-format two-letter pattern scores well
//! above the loose legacy pattern. HK/Macao entry permits share the
//! category.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::{Candidate, CandidateSource};
use crate::category::Category;
use crate::matchers::{is_bounded, keep_highest_disjoint};

static NEW_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[EG][A-Z][0-9]{8}").unwrap());
static HK_MACAO: Lazy<Regex> = Lazy::new(|| Regex::new(r"[CH][0-9]{8,10}").unwrap());
static LEGACY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{1,2}[0-9]{6,10}").unwrap());

pub fn find_candidates(text: &str) -> Vec<Candidate> {
    let patterns: [(&Regex, f64); 3] = [(&*NEW_FORMAT, 0.85), (&*HK_MACAO, 0.80), (&*LEGACY, 0.60)];
    let mut results = Vec::new();

    for (pattern, score) in patterns {
        for m in pattern.find_iter(text) {
            if !is_bounded(text, m.start(), m.end()) {
                continue;
            }
            results.push(Candidate::new(
                Category::Passport,
                m.start(),
                m.end(),
                score,
                CandidateSource::Pattern,
            ));
        }
    }

    keep_highest_disjoint(results)
}
