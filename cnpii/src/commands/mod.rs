// cnpii/src/commands/mod.rs
//! Command implementations for the `cnpii` CLI.

pub mod image;
pub mod text;

use anyhow::{Context, Result};
use std::path::Path;

use cnpii_core::{config_candidate_paths, AnalyzerConfig, ExtractedEntity};

/// Resolves the analyzer configuration: an explicit path wins, then the
/// first existing user-level candidate path, then the embedded defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    if let Some(path) = explicit {
        return AnalyzerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    for candidate in config_candidate_paths() {
        if candidate.is_file() {
            log::info!("Using configuration file {}", candidate.display());
            return AnalyzerConfig::load_from_file(&candidate)
                .with_context(|| format!("Failed to load configuration from {}", candidate.display()));
        }
    }

    Ok(AnalyzerConfig::load_default()?)
}

/// Reads an extraction-model entity file (JSON array); absent file means
/// the collaborator reported nothing.
pub(crate) fn load_entities(path: Option<&Path>) -> Result<Vec<ExtractedEntity>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entity file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse entity file {}", path.display()))
}
