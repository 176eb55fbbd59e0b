// cnpii/src/commands/image.rs
//! The `image` command: analyze OCR fragments and print redactable pixel
//! regions as JSON.

use anyhow::{Context, Result};

use cnpii_core::{ImageRedactor, PiiAnalyzer, PresetExtractor, TextFragment};

use crate::cli::ImageCommand;
use crate::commands::{load_config, load_entities};

pub fn run(cmd: &ImageCommand) -> Result<String> {
    let config = load_config(cmd.config.as_deref())?;
    let analyzer = PiiAnalyzer::new(config)?;

    let raw = std::fs::read_to_string(&cmd.fragments)
        .with_context(|| format!("Failed to read fragment file {}", cmd.fragments.display()))?;
    let fragments: Vec<TextFragment> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse fragment file {}", cmd.fragments.display()))?;

    let extractor = PresetExtractor::new(load_entities(cmd.entities.as_deref())?);
    let redactor = ImageRedactor::new(&analyzer);
    let findings = redactor.redact(&fragments, &extractor);

    let json = if cmd.pretty {
        serde_json::to_string_pretty(&findings)?
    } else {
        serde_json::to_string(&findings)?
    };
    Ok(json)
}
