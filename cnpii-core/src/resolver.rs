// cnpii-core/src/resolver.rs
//! Deterministic overlap resolution between candidate categories.
//!
//! Every byte of the analyzed text is claimed by at most one category.
//! Candidates are processed in `(start, end)` order against the accepted
//! set: a candidate that strictly outranks every accepted candidate it
//! overlaps evicts all of them; a candidate outranked or tied by any
//! overlapping accepted candidate is discarded. The tie rule (earlier-
//! accepted wins) is a fixed contract: the default category table has no
//! priority ties, but same-category duplicates do reach it.
//!
//! O(n^2) in candidate count, which stays in the tens per document.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::candidate::{Candidate, ResolvedSpan};
use crate::config::PrioritySettings;

/// Resolves the candidate union into an interval-disjoint span set.
///
/// The output is sorted by `start` and satisfies, for any two spans A and
/// B: `A.end <= B.start || B.end <= A.start`.
pub fn resolve(mut candidates: Vec<Candidate>, priorities: &PrioritySettings) -> Vec<ResolvedSpan> {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));

    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let overlapping: Vec<usize> = accepted
            .iter()
            .enumerate()
            .filter(|(_, a)| a.overlaps(&candidate))
            .map(|(i, _)| i)
            .collect();

        if overlapping.is_empty() {
            accepted.push(candidate);
            continue;
        }

        let candidate_priority = priorities.priority(candidate.category);
        let outranks_all = overlapping
            .iter()
            .all(|&i| candidate_priority < priorities.priority(accepted[i].category));

        if outranks_all {
            debug!(
                "Candidate {} [{}, {}) evicts {} overlapping accepted span(s)",
                candidate.category,
                candidate.start,
                candidate.end,
                overlapping.len()
            );
            for &i in overlapping.iter().rev() {
                accepted.remove(i);
            }
            accepted.push(candidate);
        } else {
            debug!(
                "Candidate {} [{}, {}) discarded: outranked or tied by accepted span",
                candidate.category, candidate.start, candidate.end
            );
        }
    }

    accepted.sort_by_key(|c| c.start);
    accepted.into_iter().map(ResolvedSpan::from).collect()
}
