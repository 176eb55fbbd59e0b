// cnpii-core/src/lib.rs
//! # cnpii Core Library
//!
//! `cnpii-core` provides the fundamental, platform-independent logic for
//! recognizing, validating, and reconciling Chinese-locale PII spans in
//! text, and for mapping surviving spans back onto pixel regions when the
//! text came from OCR. It defines per-category candidate matchers paired
//! with algorithmic validators, a deterministic priority-based conflict
//! resolver, and the OCR fragment merger that repairs recognizer
//! fragmentation before analysis.
//!
//! The library is designed to be pure and stateless: analysis is a
//! function of its inputs, with no I/O, no hidden globals, and no shared
//! mutable state between calls. OCR and extraction-model invocation happen
//! strictly before this core is entered and arrive as plain data (or
//! through the `EntityExtractor` seam).
//!
//! ## Modules
//!
//! * `category`: The closed seven-member PII category enum.
//! * `config`: `AnalyzerConfig` — priorities, thresholds, merge geometry, lists.
//! * `validators`: Programmatic validation (Luhn, resident-ID checksum, OCR digit repair).
//! * `matchers`: Per-category candidate matchers and the extraction-model pass-through.
//! * `resolver`: Deterministic priority-based overlap resolution.
//! * `merger`: OCR fragment line grouping, horizontal merging, offset-to-box mapping.
//! * `analyzer`: The text-mode engine (`PiiAnalyzer`).
//! * `redactor`: The image-mode pipeline (`ImageRedactor`).
//! * `candidate`: Span data structures and PII-safe logging helpers.
//! * `extraction`: The extraction-model collaborator seam.
//! * `errors`: The `CnPiiError` enum; configuration problems fail fast here.
//!
//! ## Usage Example
//!
//! ```rust
//! use cnpii_core::{AnalyzerConfig, PiiAnalyzer};
//!
//! fn main() -> Result<(), cnpii_core::CnPiiError> {
//!     // 1. Build an engine from the default configuration. Configuration
//!     //    problems fail here, never per-document.
//!     let analyzer = PiiAnalyzer::new(AnalyzerConfig::default())?;
//!
//!     // 2. Analyze some text. Pattern categories need no collaborator
//!     //    input; pass an empty entity slice.
//!     let text = "我的手机号是13812345678";
//!     let spans = analyzer.analyze(text, &[]);
//!
//!     for span in &spans {
//!         println!("{} at [{}, {})", span.category, span.start, span.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Per-document analysis never fails: empty input, malformed candidate
//! text, and a model collaborator that produced nothing all yield empty
//! results. `CnPiiError` is reserved for configuration loading and engine
//! construction, where the core must halt rather than guess.
//!
//! ## Design Principles
//!
//! * **Closed world:** The category set is a stable regulatory fact, so
//!   dispatch is a fixed table over a closed enum, not a registry.
//! * **Explicit ownership:** Engines are constructed once and passed by
//!   reference; there are no process-wide singletons.
//! * **Precision over recall:** Validators and suppression rules drop
//!   doubtful candidates; no two categories ever claim the same bytes.
//! * **Testable:** Every stage is a pure function over plain data.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod analyzer;
pub mod candidate;
pub mod category;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod matchers;
pub mod merger;
pub mod redactor;
pub mod resolver;
pub mod validators;

/// Re-exports the category enum.
pub use category::Category;

/// Re-exports the public configuration types.
pub use config::{
    config_candidate_paths,
    AnalyzerConfig,
    ListSettings,
    MergeSettings,
    PrioritySettings,
    ThresholdSettings,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::CnPiiError;

/// Re-exports span data structures and PII-safe logging helpers.
pub use candidate::{redact_sensitive, Candidate, CandidateSource, ResolvedSpan};

/// Re-exports the extraction-model collaborator seam.
pub use extraction::{EntityExtractor, ExtractedEntity, NoopExtractor, PresetExtractor};

/// Re-exports the engines.
pub use analyzer::PiiAnalyzer;
pub use redactor::{ImageRedactor, RegionFinding};

/// Re-exports the OCR geometry types for the image pipeline.
pub use merger::{merge_fragments, FragmentSlice, MergedRun, PixelRegion, TextFragment};
