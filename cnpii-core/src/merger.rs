// cnpii-core/src/merger.rs
//! OCR fragment geometry: line grouping, horizontal merging, and the
//! offset map from merged text back to pixel boxes.
//!
//! OCR backends split one logical token — a card number, an ID, a long
//! address — into several short fragments. No matcher can recognize
//! `"6217 5608 0..."` across fragment boundaries, so fragments that sit on
//! the same visual line and close together horizontally are concatenated
//! into a synthetic run first, recording which byte range of the run each
//! fragment contributed. Spans found in the run text are then projected
//! back to the union of the contributing fragments' pixel boxes.
//!
//! Line membership is transitive: grouping uses a union-find over pairwise
//! top-edge proximity, because a sequential left-to-right merge fails to
//! join a line whose fragments have uneven vertical jitter.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::config::MergeSettings;

/// One OCR-recognized token with its pixel bounding box. Read-only input
/// from the OCR collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub confidence: f64,
}

impl TextFragment {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn region(&self) -> PixelRegion {
        PixelRegion {
            left: self.left,
            top: self.top,
            right: self.right(),
            bottom: self.bottom(),
        }
    }
}

/// An axis-aligned pixel rectangle, `right`/`bottom` exclusive edges in
/// source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRegion {
    /// Smallest region covering both.
    pub fn union(&self, other: &PixelRegion) -> PixelRegion {
        PixelRegion {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Overlap-or-touch test after expanding both regions by `padding`.
    pub fn overlaps_padded(&self, other: &PixelRegion, padding: i32) -> bool {
        self.left - padding <= other.right + padding
            && other.left - padding <= self.right + padding
            && self.top - padding <= other.bottom + padding
            && other.top - padding <= self.bottom + padding
    }
}

/// The byte range of a merged run contributed by one source fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSlice {
    pub fragment_index: usize,
    pub start: usize,
    pub end: usize,
}

/// A synthetic text run built from one or more adjacent fragments, with
/// enough mapping information to send any byte range of the run back to
/// pixel space. Scoped to a single image-redaction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRun {
    pub text: String,
    pub contributing: Vec<FragmentSlice>,
}

impl MergedRun {
    /// Projects a byte span of the run text onto the union of the boxes of
    /// every fragment whose contributed range intersects the span. Returns
    /// `None` for an empty or out-of-range span.
    pub fn project(&self, start: usize, end: usize, fragments: &[TextFragment]) -> Option<PixelRegion> {
        if start >= end {
            return None;
        }
        let mut region: Option<PixelRegion> = None;
        for slice in &self.contributing {
            if slice.start < end && start < slice.end {
                let fragment_region = fragments.get(slice.fragment_index)?.region();
                region = Some(match region {
                    Some(r) => r.union(&fragment_region),
                    None => fragment_region,
                });
            }
        }
        region
    }
}

// Disjoint-set union with path compression; indices are dense fragment
// positions so plain vectors suffice.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let p = self.parent[x];
        if p == x {
            return x;
        }
        let root = self.find(p);
        self.parent[x] = root;
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }
}

/// Merges OCR fragments into synthetic runs.
///
/// Phase 1 groups fragments into visual lines by transitive top-edge
/// proximity; phase 2 sorts each line left-to-right and concatenates
/// fragments separated by at most the configured horizontal gap, with no
/// inserted separator. Fragments with empty text are ignored.
pub fn merge_fragments(fragments: &[TextFragment], settings: &MergeSettings) -> Vec<MergedRun> {
    let indices: Vec<usize> = fragments
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.text.is_empty())
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        return Vec::new();
    }

    // Phase 1: transitive line grouping.
    let mut uf = UnionFind::new(fragments.len());
    for (pos, &i) in indices.iter().enumerate() {
        for &j in &indices[pos + 1..] {
            if (fragments[i].top - fragments[j].top).abs() <= settings.line_tolerance_px {
                uf.union(i, j);
            }
        }
    }

    let mut lines: std::collections::HashMap<usize, Vec<usize>> = std::collections::HashMap::new();
    for &i in &indices {
        lines.entry(uf.find(i)).or_default().push(i);
    }

    // Deterministic line order: topmost (then leftmost) line first.
    let mut ordered_lines: Vec<Vec<usize>> = lines.into_values().collect();
    for line in &mut ordered_lines {
        line.sort_by_key(|&i| (fragments[i].left, fragments[i].top));
    }
    ordered_lines.sort_by_key(|line| {
        let first = line[0];
        (fragments[first].top, fragments[first].left)
    });

    // Phase 2: horizontal merge within each line.
    let mut runs = Vec::new();
    for line in ordered_lines {
        let mut current: Option<(MergedRun, i32)> = None;

        for &i in &line {
            let fragment = &fragments[i];
            match current.take() {
                Some((mut run, right_edge)) if fragment.left - right_edge <= settings.gap_tolerance_px => {
                    let start = run.text.len();
                    run.text.push_str(&fragment.text);
                    run.contributing.push(FragmentSlice {
                        fragment_index: i,
                        start,
                        end: run.text.len(),
                    });
                    current = Some((run, right_edge.max(fragment.right())));
                }
                previous => {
                    if let Some((run, _)) = previous {
                        runs.push(run);
                    }
                    let run = MergedRun {
                        text: fragment.text.clone(),
                        contributing: vec![FragmentSlice {
                            fragment_index: i,
                            start: 0,
                            end: fragment.text.len(),
                        }],
                    };
                    current = Some((run, fragment.right()));
                }
            }
        }

        if let Some((run, _)) = current {
            runs.push(run);
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, left: i32, top: i32, width: i32, height: i32) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            left,
            top,
            width,
            height,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_adjacent_fragments_merge_into_one_run() {
        // Three digit groups at 15-20px gaps on the same visual line.
        let fragments = [
            fragment("62175", 100, 50, 80, 20),
            fragment("6080", 195, 52, 60, 20),
            fragment("0040", 273, 49, 60, 20),
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "6217560800040");
        assert_eq!(
            runs[0].contributing,
            vec![
                FragmentSlice { fragment_index: 0, start: 0, end: 5 },
                FragmentSlice { fragment_index: 1, start: 5, end: 9 },
                FragmentSlice { fragment_index: 2, start: 9, end: 13 },
            ]
        );
    }

    #[test]
    fn test_projection_attributes_ranges_to_source_boxes() {
        let fragments = [
            fragment("62175", 100, 50, 80, 20),
            fragment("6080", 195, 52, 60, 20),
            fragment("0040", 273, 49, 60, 20),
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        let run = &runs[0];

        // Bytes 5..9 live entirely in the middle fragment.
        let mid = run.project(5, 9, &fragments).unwrap();
        assert_eq!(mid, PixelRegion { left: 195, top: 52, right: 255, bottom: 72 });

        // A span straddling the first boundary unions both boxes.
        let straddle = run.project(3, 7, &fragments).unwrap();
        assert_eq!(straddle, PixelRegion { left: 100, top: 50, right: 255, bottom: 72 });

        // The whole run covers all three boxes.
        let whole = run.project(0, run.text.len(), &fragments).unwrap();
        assert_eq!(whole, PixelRegion { left: 100, top: 49, right: 333, bottom: 72 });
    }

    #[test]
    fn test_wide_gap_splits_runs() {
        let fragments = [
            fragment("62175", 100, 50, 80, 20),
            fragment("6080", 220, 50, 60, 20), // 40px gap
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn test_vertical_separation_splits_lines() {
        let fragments = [
            fragment("62175", 100, 50, 80, 20),
            fragment("6080", 185, 80, 60, 20),
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn test_transitive_line_grouping() {
        // Tops 10/14/18: the outer pair differs by 8px (> tolerance) but
        // chains through the middle fragment. A sequential threshold pass
        // ordered by top would split this line.
        let fragments = [
            fragment("AAA", 100, 10, 30, 12),
            fragment("BBB", 140, 14, 30, 12),
            fragment("CCC", 180, 18, 30, 12),
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "AAABBBCCC");
    }

    #[test]
    fn test_overlapping_fragments_merge() {
        // Negative horizontal gap (boxes overlap) still merges.
        let fragments = [
            fragment("130", 100, 50, 40, 20),
            fragment("1234", 135, 50, 50, 20),
        ];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "1301234");
    }

    #[test]
    fn test_empty_fragment_list() {
        assert!(merge_fragments(&[], &MergeSettings::default()).is_empty());
    }

    #[test]
    fn test_empty_text_fragments_ignored() {
        let fragments = [fragment("", 100, 50, 40, 20), fragment("abc", 150, 50, 40, 20)];
        let runs = merge_fragments(&fragments, &MergeSettings::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "abc");
        assert_eq!(runs[0].contributing[0].fragment_index, 1);
    }

    #[test]
    fn test_region_union_and_padding() {
        let a = PixelRegion { left: 0, top: 0, right: 10, bottom: 10 };
        let b = PixelRegion { left: 14, top: 0, right: 24, bottom: 10 };
        assert!(!a.overlaps_padded(&b, 0));
        assert!(a.overlaps_padded(&b, 5));
        assert_eq!(a.union(&b), PixelRegion { left: 0, top: 0, right: 24, bottom: 10 });
    }
}
