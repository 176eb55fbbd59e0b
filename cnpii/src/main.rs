// cnpii/src/main.rs
//! cnpii entry point.
//!
//! Parses the CLI, initializes logging, and dispatches to the command
//! implementations. Findings go to stdout as JSON; diagnostics go to
//! stderr through the logger.

use anyhow::Result;
use clap::Parser;

use cnpii::cli::{Cli, Commands};
use cnpii::commands;

fn init_logger(quiet: bool, debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if quiet {
        builder.filter_level(log::LevelFilter::Off);
    } else if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.quiet, args.debug);

    let output = match &args.command {
        Commands::Text(cmd) => commands::text::run(cmd)?,
        Commands::Image(cmd) => commands::image::run(cmd)?,
    };

    println!("{output}");
    Ok(())
}
