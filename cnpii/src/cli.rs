// cnpii/src/cli.rs
//! This file defines the command-line interface (CLI) for the cnpii
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "cnpii",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find Chinese-locale PII in text and OCR output",
    long_about = "cnpii is a command-line utility for locating Personally Identifiable Information in Chinese-locale text and in OCR output. It reports interval-disjoint spans (text mode) or redactable pixel regions (image mode) as JSON; the actual substitution or pixelation happens in downstream tooling.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'cnpii' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `cnpii` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyzes text and reports PII spans as JSON.
    #[command(about = "Analyzes text (argument or stdin) and reports PII spans as JSON.")]
    Text(TextCommand),

    /// Analyzes OCR fragments and reports redactable pixel regions as JSON.
    #[command(about = "Analyzes an OCR fragment file and reports redactable pixel regions as JSON.")]
    Image(ImageCommand),
}

/// Arguments for the `text` command.
#[derive(Parser, Debug)]
pub struct TextCommand {
    /// The text to analyze (reads from stdin if not provided).
    #[arg(value_name = "TEXT", help = "Text to analyze; reads stdin when omitted.")]
    pub text: Option<String>,

    /// Path to a JSON file of extraction-model entities for this text.
    #[arg(long = "entities", value_name = "FILE", help = "JSON array of {entity_key, text, probability} objects from the extraction model.")]
    pub entities: Option<PathBuf>,

    /// Path to a custom analyzer configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "CNPII_CONFIG", help = "Path to a custom analyzer configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long = "pretty", help = "Pretty-print the JSON output.")]
    pub pretty: bool,
}

/// Arguments for the `image` command.
#[derive(Parser, Debug)]
pub struct ImageCommand {
    /// Path to a JSON file of OCR fragments.
    #[arg(long = "fragments", short = 'f', value_name = "FILE", help = "JSON array of {text, left, top, width, height, confidence} OCR fragments.")]
    pub fragments: PathBuf,

    /// Path to a JSON file of extraction-model entities.
    #[arg(long = "entities", value_name = "FILE", help = "JSON array of {entity_key, text, probability} objects from the extraction model.")]
    pub entities: Option<PathBuf>,

    /// Path to a custom analyzer configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "CNPII_CONFIG", help = "Path to a custom analyzer configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long = "pretty", help = "Pretty-print the JSON output.")]
    pub pretty: bool,
}
