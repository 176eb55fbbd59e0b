// cnpii/src/lib.rs
//! # cnpii CLI Application
//!
//! This crate provides the command-line interface over `cnpii-core`: text
//! analysis and OCR-fragment redaction planning, with JSON output suitable
//! for piping into downstream substitution or pixelation tooling.

pub mod cli;
pub mod commands;
