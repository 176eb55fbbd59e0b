// cnpii-core/src/redactor.rs
//! The image-mode pipeline: OCR fragments in, redactable pixel regions out.
//!
//! Fragments are first repaired into merged runs (see `merger`), each run
//! is analyzed as a standalone document, and surviving spans are projected
//! back onto the union of the pixel boxes they cover. Finally, regions of
//! the same category whose padded boxes overlap are collapsed into one,
//! so downstream pixelation operators receive clean, non-duplicated
//! rectangles.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::PiiAnalyzer;
use crate::category::Category;
use crate::extraction::EntityExtractor;
use crate::merger::{merge_fragments, PixelRegion, TextFragment};

/// One redactable region: the category that claimed it, its pixel bounds,
/// and the claiming span's confidence (max over merged parts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFinding {
    pub category: Category,
    pub region: PixelRegion,
    pub score: f64,
}

/// Image-mode orchestration over a shared text analyzer.
#[derive(Debug, Clone)]
pub struct ImageRedactor<'a> {
    analyzer: &'a PiiAnalyzer,
}

impl<'a> ImageRedactor<'a> {
    pub fn new(analyzer: &'a PiiAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Runs the full image pipeline on already-materialized OCR output.
    ///
    /// An empty fragment list, or fragments containing no PII, yields an
    /// empty result. Regions are ordered top-to-bottom, then left-to-right.
    pub fn redact(
        &self,
        fragments: &[TextFragment],
        extractor: &dyn EntityExtractor,
    ) -> Vec<RegionFinding> {
        if fragments.is_empty() {
            return Vec::new();
        }

        let runs = merge_fragments(fragments, &self.analyzer.config().merge);
        debug!("Merged {} fragment(s) into {} run(s)", fragments.len(), runs.len());

        // Independent runs analyze concurrently; each run is a standalone
        // document for the text pipeline.
        let mut findings: Vec<RegionFinding> = runs
            .par_iter()
            .flat_map_iter(|run| {
                self.analyzer
                    .analyze_with(&run.text, extractor)
                    .into_iter()
                    .filter_map(|span| {
                        run.project(span.start, span.end, fragments).map(|region| RegionFinding {
                            category: span.category,
                            region,
                            score: span.score,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        findings = merge_same_category_regions(findings, self.analyzer.config().merge.region_padding_px);
        findings.sort_by_key(|f| (f.region.top, f.region.left));

        info!("Image pipeline produced {} region(s)", findings.len());
        findings
    }
}

/// Collapses overlapping (after padding) regions of the same category into
/// their bounding union, keeping the highest score of the merged parts.
fn merge_same_category_regions(findings: Vec<RegionFinding>, padding: i32) -> Vec<RegionFinding> {
    if findings.len() < 2 {
        return findings;
    }

    let n = findings.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut Vec<usize>, x: usize) -> usize {
        let p = parent[x];
        if p == x {
            return x;
        }
        let root = find(parent, p);
        parent[x] = root;
        root
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if findings[i].category == findings[j].category
                && findings[i].region.overlaps_padded(&findings[j].region, padding)
            {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }
    }

    let mut merged: std::collections::HashMap<usize, RegionFinding> = std::collections::HashMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        let finding = &findings[i];
        merged
            .entry(root)
            .and_modify(|existing| {
                existing.region = existing.region.union(&finding.region);
                existing.score = existing.score.max(finding.score);
            })
            .or_insert_with(|| finding.clone());
    }

    merged.into_values().collect()
}
