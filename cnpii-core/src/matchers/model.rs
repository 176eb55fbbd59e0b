// cnpii-core/src/matchers/model.rs
//! Pass-through adapter for extraction-model output.
//!
//! Names and addresses are never derived here; the external extraction
//! model supplies `(entity_key, text, probability)` candidates and this
//! adapter shapes them into ordinary `Candidate`s by locating each
//! candidate's first unclaimed occurrence in the source text. The model's
//! probability becomes the score unchanged.
//!
//! Two configured lists override the model: deny-list strings always emit
//! a maximum-confidence name candidate for every occurrence, and
//! allow-list strings suppress any model-sourced candidate with exactly
//! matching text.

use log::debug;

use crate::candidate::{log_filtered_debug, Candidate, CandidateSource};
use crate::category::Category;
use crate::config::ListSettings;
use crate::extraction::ExtractedEntity;

pub fn find_candidates(
    text: &str,
    entities: &[ExtractedEntity],
    lists: &ListSettings,
) -> Vec<Candidate> {
    let mut results = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    // Deny-list overrides come first and claim their occurrences, so a
    // model report of the same string does not double-emit.
    for deny in &lists.name_deny_list {
        if deny.is_empty() {
            continue;
        }
        for (idx, s) in text.match_indices(deny.as_str()) {
            let range = (idx, idx + s.len());
            results.push(Candidate::new(
                Category::Name,
                range.0,
                range.1,
                1.0,
                CandidateSource::DenyList,
            ));
            claimed.push(range);
        }
    }

    for entity in entities {
        let Some(category) = Category::from_entity_key(&entity.entity_key) else {
            debug!("Ignoring extraction entity with unknown key '{}'", entity.entity_key);
            continue;
        };
        if entity.text.is_empty() {
            continue;
        }

        if lists.name_allow_list.iter().any(|allowed| allowed == &entity.text) {
            log_filtered_debug(module_path!(), category, &entity.text, "allow_list");
            continue;
        }

        match category {
            Category::Name => {
                if !is_plausible_name(&entity.text) {
                    log_filtered_debug(module_path!(), category, &entity.text, "name_shape");
                    continue;
                }
            }
            Category::Address => {
                let len = entity.text.chars().count();
                if len < lists.min_address_chars || len > lists.max_address_chars {
                    log_filtered_debug(module_path!(), category, &entity.text, "address_length");
                    continue;
                }
            }
            _ => unreachable!("entity keys only map to name/address"),
        }

        // First occurrence not yet claimed by an earlier candidate.
        let location = text.match_indices(entity.text.as_str()).find(|(idx, s)| {
            let (start, end) = (*idx, idx + s.len());
            !claimed.iter().any(|(cs, ce)| start < *ce && *cs < end)
        });

        let Some((idx, s)) = location else {
            log_filtered_debug(module_path!(), category, &entity.text, "not_in_text");
            continue;
        };

        let range = (idx, idx + s.len());
        results.push(Candidate::new(
            category,
            range.0,
            range.1,
            entity.probability.clamp(0.0, 1.0),
            CandidateSource::Model,
        ));
        claimed.push(range);
    }

    results
}

/// 2-5 CJK characters; filters extraction noise that is clearly not a
/// personal name.
fn is_plausible_name(name: &str) -> bool {
    let count = name.chars().count();
    if !(2..=5).contains(&count) {
        return false;
    }
    name.chars().all(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}
