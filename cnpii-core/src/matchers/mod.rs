// cnpii-core/src/matchers/mod.rs
//! Per-category candidate matchers.
//!
//! One module per pattern-based category (phone, id_card, bank_card,
//! passport, email) plus the pass-through adapter for extraction-model
//! output (`model`). Matchers scan the text independently and never see
//! each other's output; all cross-category arbitration happens later in
//! the resolver.
//!
//! The category set is closed, so dispatch is a fixed table of function
//! pointers rather than a registry.
//!
//! License: MIT OR APACHE 2.0

pub mod bank_card;
pub mod email;
pub mod id_card;
pub mod model;
pub mod passport;
pub mod phone;

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// A pattern matcher: text in, raw candidates of one category out.
pub type MatcherFn = fn(&str) -> Vec<Candidate>;

/// Fixed dispatch table over the pattern-based categories. The
/// extraction-model pass-through is invoked separately because it needs
/// the collaborator's candidate list.
pub const PATTERN_MATCHERS: [MatcherFn; 5] = [
    phone::find_candidates,
    id_card::find_candidates,
    bank_card::find_candidates,
    passport::find_candidates,
    email::find_candidates,
];

pub(crate) fn prev_char(text: &str, idx: usize) -> Option<char> {
    text[..idx].chars().next_back()
}

pub(crate) fn next_char(text: &str, idx: usize) -> Option<char> {
    text[idx..].chars().next()
}

/// True when the byte range has no ASCII letter or digit immediately
/// adjacent on either side. CJK context characters do not break the
/// boundary. The `regex` crate has no lookaround, so the context rule is
/// checked against the source text after matching.
pub(crate) fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let left_ok = prev_char(text, start).map_or(true, |c| !c.is_ascii_alphanumeric());
    let right_ok = next_char(text, end).map_or(true, |c| !c.is_ascii_alphanumeric());
    left_ok && right_ok
}

pub(crate) fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reduces one matcher's own overlapping hits to a disjoint set, keeping
/// the earliest-starting, highest-scoring candidate for each region. This
/// is intra-category cleanup only; cross-category conflicts are the
/// resolver's job.
pub(crate) fn keep_highest_disjoint(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    if candidates.is_empty() {
        return candidates;
    }

    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
            .then_with(|| a.end.cmp(&b.end))
    });

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|k| k.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }
    kept
}
