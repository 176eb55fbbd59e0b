// cnpii-core/src/candidate.rs
//! Provides core data structures and utility functions for candidate spans,
//! resolved spans, and PII-safe logging within the `cnpii-core` library.

use serde::{Deserialize, Serialize};
use log::debug;
use crate::category::Category;

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use hex;

lazy_static! {
    /// A static boolean that is initialized once to determine if raw PII is
    /// allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CNPII_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Regex pattern search plus programmatic validation.
    Pattern,
    /// The external extraction-model collaborator.
    Model,
    /// A configured deny-list override; always maximum confidence.
    DenyList,
}

/// A raw candidate span produced by one matcher, before conflict
/// resolution. Offsets are byte offsets into the analyzed text, half-open
/// (`end` exclusive) and always on char boundaries. Candidates are
/// immutable once produced and never outlive the analysis call that
/// created them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub score: f64,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(
        category: Category,
        start: usize,
        end: usize,
        score: f64,
        source: CandidateSource,
    ) -> Self {
        Self { category, start, end, score, source }
    }

    /// Interval overlap test against another span (half-open semantics).
    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A candidate that survived priority resolution. The set of resolved
/// spans returned for one text is interval-disjoint by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSpan {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub score: f64,
    pub source: CandidateSource,
}

impl From<Candidate> for ResolvedSpan {
    fn from(c: Candidate) -> Self {
        ResolvedSpan {
            category: c.category,
            start: c.start,
            end: c.end,
            score: c.score,
            source: c.source,
        }
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Logs a matched candidate at debug level without leaking the matched
/// text unless the PII debug gate is enabled.
pub fn log_candidate_debug(module_path: &str, category: Category, matched: &str, score: f64) {
    debug!(
        "{} Found candidate: category='{}', text='{}', score={:.2}",
        module_path,
        category,
        get_loggable_content(matched),
        score
    );
}

/// Logs a candidate that was filtered out (failed validation or was
/// suppressed) at debug level, PII-safe.
pub fn log_filtered_debug(module_path: &str, category: Category, matched: &str, reason: &str) {
    debug!(
        "{} Filtered candidate: category='{}', text='{}', reason={}",
        module_path,
        category,
        get_loggable_content(matched),
        reason
    );
}

/// Canonical hash of a matched snippet, for audit trails and
/// deduplication without retaining the raw value.
pub fn canonical_sample_hash(category: Category, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(category.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_canonical_sample_hash_consistency() {
        let h1 = canonical_sample_hash(Category::Email, "Test@Example.COM ");
        let h2 = canonical_sample_hash(Category::Email, "test@example.com");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_canonical_sample_hash_category_scoped() {
        let h1 = canonical_sample_hash(Category::Name, "张三");
        let h2 = canonical_sample_hash(Category::Address, "张三");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_overlap_semantics() {
        let a = Candidate::new(Category::Phone, 0, 5, 0.9, CandidateSource::Pattern);
        let b = Candidate::new(Category::Email, 5, 8, 0.9, CandidateSource::Pattern);
        let c = Candidate::new(Category::Email, 4, 8, 0.9, CandidateSource::Pattern);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_span_wire_format() {
        // Downstream consumers rely on snake_case category/source names.
        let span = ResolvedSpan {
            category: Category::IdCard,
            start: 4,
            end: 22,
            score: 0.95,
            source: CandidateSource::Pattern,
        };
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"category\":\"id_card\""));
        assert!(json.contains("\"source\":\"pattern\""));

        let back: ResolvedSpan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }
}
