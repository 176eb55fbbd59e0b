// cnpii-core/src/category.rs
//! The closed set of PII categories recognized by this crate.
//!
//! The category list is a stable domain fact (the regulated Chinese PII
//! types), so it is modeled as a closed enum with a fixed dispatch table
//! rather than an open registry.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// A PII category. Lower default priority number = higher precedence
/// during overlap resolution (see `resolver`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    IdCard,
    BankCard,
    Phone,
    Passport,
    Email,
    Name,
    Address,
}

impl Category {
    /// All categories, in default priority order (highest first).
    pub const ALL: [Category; 7] = [
        Category::IdCard,
        Category::BankCard,
        Category::Phone,
        Category::Passport,
        Category::Email,
        Category::Name,
        Category::Address,
    ];

    /// Stable snake_case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::IdCard => "id_card",
            Category::BankCard => "bank_card",
            Category::Phone => "phone",
            Category::Passport => "passport",
            Category::Email => "email",
            Category::Name => "name",
            Category::Address => "address",
        }
    }

    /// Maps an extraction-model entity key to a category.
    ///
    /// The upstream information-extraction collaborator labels its output
    /// with Chinese schema keys; both common aliases per category are
    /// accepted. Unknown keys yield `None` and the entity is ignored.
    pub fn from_entity_key(key: &str) -> Option<Category> {
        match key.trim() {
            "姓名" | "人名" => Some(Category::Name),
            "地址" | "具体地址" => Some(Category::Address),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
