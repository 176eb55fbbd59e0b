// cnpii/src/commands/text.rs
//! The `text` command: analyze a string and print PII spans as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;

use cnpii_core::{Category, CandidateSource, PiiAnalyzer};

use crate::cli::TextCommand;
use crate::commands::{load_config, load_entities};

/// One reported span. Offsets are byte offsets into the analyzed text so
/// downstream substitution can slice directly.
#[derive(Debug, Serialize)]
struct SpanReport<'a> {
    category: Category,
    start: usize,
    end: usize,
    score: f64,
    source: CandidateSource,
    text: &'a str,
}

pub fn run(cmd: &TextCommand) -> Result<String> {
    let config = load_config(cmd.config.as_deref())?;
    let analyzer = PiiAnalyzer::new(config)?;
    let entities = load_entities(cmd.entities.as_deref())?;

    let text = match &cmd.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    let spans = analyzer.analyze(&text, &entities);
    let reports: Vec<SpanReport<'_>> = spans
        .iter()
        .map(|span| SpanReport {
            category: span.category,
            start: span.start,
            end: span.end,
            score: span.score,
            source: span.source,
            text: &text[span.start..span.end],
        })
        .collect();

    let json = if cmd.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    Ok(json)
}
