//! Configuration management for `cnpii-core`.
//!
//! This module defines the analyzer configuration: category priorities,
//! per-category score thresholds, OCR merge geometry, and the name
//! allow/deny lists. It handles serialization/deserialization of YAML
//! configurations and provides utilities for loading and validating them.
//!
//! Configuration problems fail fast at load time — a per-document failure
//! would silently leak unredacted PII, so the engine refuses to construct
//! from an invalid config instead of guessing (see `validate`).
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use log::{debug, info};

use crate::category::Category;
use crate::errors::CnPiiError;

/// Category priorities for overlap resolution. Lower number wins. All
/// seven categories must carry a distinct priority >= 1; this is checked
/// by `AnalyzerConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritySettings {
    pub id_card: u8,
    pub bank_card: u8,
    pub phone: u8,
    pub passport: u8,
    pub email: u8,
    pub name: u8,
    pub address: u8,
}

impl Default for PrioritySettings {
    fn default() -> Self {
        Self {
            id_card: 1,
            bank_card: 2,
            phone: 3,
            passport: 4,
            email: 5,
            name: 6,
            address: 7,
        }
    }
}

impl PrioritySettings {
    pub fn priority(&self, category: Category) -> u8 {
        match category {
            Category::IdCard => self.id_card,
            Category::BankCard => self.bank_card,
            Category::Phone => self.phone,
            Category::Passport => self.passport,
            Category::Email => self.email,
            Category::Name => self.name,
            Category::Address => self.address,
        }
    }
}

/// Per-category confidence thresholds. Candidates scoring below their
/// category's threshold are dropped before resolution. Model-sourced
/// categories (name, address) run at lower thresholds because extraction
/// probabilities are typically 0.3-0.6, while pattern categories sit at
/// fixed scores well above 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub default: f64,
    pub id_card: f64,
    pub bank_card: f64,
    pub phone: f64,
    pub passport: f64,
    pub email: f64,
    pub name: f64,
    pub address: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            default: 0.35,
            id_card: 0.5,
            bank_card: 0.5,
            phone: 0.5,
            passport: 0.5,
            email: 0.5,
            name: 0.3,
            address: 0.3,
        }
    }
}

impl ThresholdSettings {
    pub fn threshold(&self, category: Category) -> f64 {
        match category {
            Category::IdCard => self.id_card,
            Category::BankCard => self.bank_card,
            Category::Phone => self.phone,
            Category::Passport => self.passport,
            Category::Email => self.email,
            Category::Name => self.name,
            Category::Address => self.address,
        }
    }

    fn all(&self) -> [(&'static str, f64); 8] {
        [
            ("default", self.default),
            ("id_card", self.id_card),
            ("bank_card", self.bank_card),
            ("phone", self.phone),
            ("passport", self.passport),
            ("email", self.email),
            ("name", self.name),
            ("address", self.address),
        ]
    }
}

/// OCR fragment merge geometry. These are empirically tuned constants with
/// no principled derivation; they are configuration, not hard-coded law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Two fragments belong to the same visual line when their top edges
    /// differ by at most this many pixels (transitively).
    pub line_tolerance_px: i32,
    /// Adjacent fragments on a line merge into one run when the horizontal
    /// gap between them is at most this many pixels. Chosen to span typical
    /// OCR token spacing for digit-group runs like bank card numbers.
    pub gap_tolerance_px: i32,
    /// Padding applied around final pixel regions before same-category
    /// regions are merged.
    pub region_padding_px: i32,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            line_tolerance_px: 5,
            gap_tolerance_px: 20,
            region_padding_px: 5,
        }
    }
}

/// Allow/deny lists and shape gates for the extraction-model pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// Names that never yield a span, even when the extraction model
    /// reports them with high probability.
    pub name_allow_list: Vec<String>,
    /// Strings that always yield a maximum-confidence name span for every
    /// occurrence, regardless of model output.
    pub name_deny_list: Vec<String>,
    /// Address candidates shorter than this many characters are dropped as
    /// extraction fragment noise.
    pub min_address_chars: usize,
    /// Address candidates longer than this many characters are dropped.
    pub max_address_chars: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            name_allow_list: Vec::new(),
            name_deny_list: Vec::new(),
            min_address_chars: 2,
            max_address_chars: 100,
        }
    }
}

/// Top-level analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub priorities: PrioritySettings,
    pub thresholds: ThresholdSettings,
    pub merge: MergeSettings,
    pub lists: ListSettings,
}

impl AnalyzerConfig {
    /// Loads configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CnPiiError> {
        let path = path.as_ref();
        info!("Loading analyzer configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(|e| CnPiiError::ConfigRead(path.display().to_string(), e))?;
        let config: AnalyzerConfig = serde_yml::from_str(&text)
            .map_err(|e| CnPiiError::ConfigParse(path.display().to_string(), e))?;

        config.validate()?;
        info!("Loaded analyzer configuration from {}.", path.display());
        Ok(config)
    }

    /// Loads the built-in default configuration from the embedded YAML.
    pub fn load_default() -> Result<Self, CnPiiError> {
        debug!("Loading default analyzer configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: AnalyzerConfig = serde_yml::from_str(default_yaml)
            .map_err(|e| CnPiiError::ConfigParse("embedded default".to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration integrity. Collects every problem before
    /// failing so a broken config is fixable in one round trip.
    pub fn validate(&self) -> Result<(), CnPiiError> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for category in Category::ALL {
            let p = self.priorities.priority(category);
            if p == 0 {
                errors.push(format!("Category '{category}' has priority 0; priorities start at 1."));
            }
            if !seen.insert(p) {
                errors.push(format!(
                    "Category '{category}' shares priority {p} with another category; priorities must be distinct."
                ));
            }
        }

        for (name, value) in self.thresholds.all() {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("Threshold '{name}' is {value}; must be within [0, 1]."));
            }
        }

        if self.merge.line_tolerance_px < 0 {
            errors.push("merge.line_tolerance_px must be non-negative.".to_string());
        }
        if self.merge.gap_tolerance_px < 0 {
            errors.push("merge.gap_tolerance_px must be non-negative.".to_string());
        }
        if self.merge.region_padding_px < 0 {
            errors.push("merge.region_padding_px must be non-negative.".to_string());
        }

        if self.lists.min_address_chars > self.lists.max_address_chars {
            errors.push(format!(
                "lists.min_address_chars ({}) exceeds lists.max_address_chars ({}).",
                self.lists.min_address_chars, self.lists.max_address_chars
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CnPiiError::ConfigValidation(errors.join("\n")))
        }
    }
}

/// Candidate locations for a user-level configuration file, most specific
/// first. Callers probe these when no explicit path is given.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(explicit) = std::env::var("CNPII_CONFIG") {
        if !explicit.trim().is_empty() {
            paths.push(PathBuf::from(explicit));
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("cnpii").join("config.yaml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".cnpii.yaml"));
    }
    paths
}
