// cnpii-core/src/analyzer.rs
//! The text-mode analysis engine.
//!
//! A `PiiAnalyzer` is constructed once from a validated configuration and
//! then shared freely: analysis is a pure function of its inputs, holds no
//! mutable state, and performs no I/O, so concurrent callers need no
//! synchronization. There is deliberately no process-wide singleton; the
//! caller owns the engine and passes it where it is needed.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use rayon::prelude::*;

use crate::candidate::{Candidate, ResolvedSpan};
use crate::config::AnalyzerConfig;
use crate::errors::CnPiiError;
use crate::extraction::{EntityExtractor, ExtractedEntity};
use crate::matchers::{self, PATTERN_MATCHERS};
use crate::resolver;

/// Recognizes and reconciles PII spans in text.
#[derive(Debug, Clone)]
pub struct PiiAnalyzer {
    config: AnalyzerConfig,
}

impl PiiAnalyzer {
    /// Builds an analyzer from the given configuration.
    ///
    /// The configuration is validated here and never again: a malformed
    /// priority or threshold table must fail at construction, not leak
    /// unredacted PII one document at a time.
    pub fn new(config: AnalyzerConfig) -> Result<Self, CnPiiError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builds an analyzer with the embedded default configuration.
    pub fn with_defaults() -> Result<Self, CnPiiError> {
        Self::new(AnalyzerConfig::load_default()?)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes one text and returns the interval-disjoint set of PII
    /// spans, sorted by start offset.
    ///
    /// `model_entities` is the already-materialized output of the
    /// extraction-model collaborator for this text; pass an empty slice
    /// when only pattern categories matter. Empty or PII-free input yields
    /// an empty result, never an error.
    pub fn analyze(&self, text: &str, model_entities: &[ExtractedEntity]) -> Vec<ResolvedSpan> {
        if text.is_empty() {
            return Vec::new();
        }

        // Pattern matchers are mutually independent; fan out, then join
        // before resolution, which needs the full candidate union.
        let mut candidates: Vec<Candidate> = PATTERN_MATCHERS
            .par_iter()
            .flat_map_iter(|matcher| matcher(text))
            .collect();

        candidates.extend(matchers::model::find_candidates(
            text,
            model_entities,
            &self.config.lists,
        ));

        let before = candidates.len();
        candidates.retain(|c| c.score >= self.config.thresholds.threshold(c.category));
        if candidates.len() < before {
            debug!(
                "Threshold filter dropped {} of {} candidate(s)",
                before - candidates.len(),
                before
            );
        }

        let resolved = resolver::resolve(candidates, &self.config.priorities);
        debug!("Analysis produced {} resolved span(s)", resolved.len());
        resolved
    }

    /// Like `analyze`, but invokes the extraction collaborator for the
    /// text first.
    pub fn analyze_with(&self, text: &str, extractor: &dyn EntityExtractor) -> Vec<ResolvedSpan> {
        if text.is_empty() {
            return Vec::new();
        }
        let entities = extractor.extract(text);
        self.analyze(text, &entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_empty_text_yields_empty_result() {
        let analyzer = PiiAnalyzer::with_defaults().unwrap();
        assert!(analyzer.analyze("", &[]).is_empty());
        assert!(analyzer.analyze("没有任何敏感信息。", &[]).is_empty());
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = AnalyzerConfig::default();
        config.priorities.name = config.priorities.address;
        assert!(PiiAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_low_probability_model_entity_filtered() {
        let analyzer = PiiAnalyzer::with_defaults().unwrap();
        let entities = [ExtractedEntity::new("姓名", "张三", 0.1)];
        assert!(analyzer.analyze("联系人：张三", &entities).is_empty());
    }

    #[test]
    fn test_threshold_is_per_category() {
        // 0.4 clears the name threshold (0.3) but not phone's (0.5).
        let analyzer = PiiAnalyzer::with_defaults().unwrap();
        let entities = [ExtractedEntity::new("姓名", "张三", 0.4)];
        let spans = analyzer.analyze("联系人：张三", &entities);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Name);
    }
}
