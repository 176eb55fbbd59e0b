// cnpii-core/src/extraction.rs
//! The extraction-model collaborator seam.
//!
//! Free-text entities (names, addresses) come from an external
//! information-extraction model, never from this crate. The `EntityExtractor`
//! trait is the boundary: given a text, an implementor returns zero or more
//! labeled candidates with probabilities, which the pass-through matcher
//! then shapes into ordinary candidates. A collaborator that produces
//! nothing returns an empty list; that is a valid outcome, not an error.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

/// One candidate reported by the extraction model.
///
/// `entity_key` carries the model's Chinese schema label (e.g. "姓名",
/// "地址"); see `Category::from_entity_key` for the accepted aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub entity_key: String,
    pub text: String,
    pub probability: f64,
}

impl ExtractedEntity {
    pub fn new(entity_key: impl Into<String>, text: impl Into<String>, probability: f64) -> Self {
        Self {
            entity_key: entity_key.into(),
            text: text.into(),
            probability,
        }
    }
}

/// A source of extraction-model candidates for a given text.
///
/// Implementations must be `Send + Sync`: the image pipeline analyzes
/// merged runs concurrently and shares the extractor across workers. The
/// contract assumes results are already materialized or cheaply computed;
/// no timeout or cancellation is imposed here.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<ExtractedEntity>;
}

/// An extractor that reports nothing. Used when only pattern categories
/// matter, or when the model collaborator is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtractor;

impl EntityExtractor for NoopExtractor {
    fn extract(&self, _text: &str) -> Vec<ExtractedEntity> {
        Vec::new()
    }
}

/// An extractor backed by a fixed candidate list, returned for every text.
///
/// The pass-through matcher only emits candidates whose text actually
/// occurs in the analyzed string, so a preset list works as a stand-in for
/// the model collaborator in batch tooling and tests.
#[derive(Debug, Clone, Default)]
pub struct PresetExtractor {
    entities: Vec<ExtractedEntity>,
}

impl PresetExtractor {
    pub fn new(entities: Vec<ExtractedEntity>) -> Self {
        Self { entities }
    }
}

impl EntityExtractor for PresetExtractor {
    fn extract(&self, _text: &str) -> Vec<ExtractedEntity> {
        self.entities.clone()
    }
}
