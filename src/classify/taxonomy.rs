//! Purpose taxonomy configuration.
//!
//! The classifier is a rule table, not a model: each category holds named
//! rules, each rule one regex pattern tested against a field's nearby text.
//! The table is plain data so it can be loaded from a JSON file, inspected,
//! and tested independently of any scoring code.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One category of the taxonomy: a name plus its rule patterns, keyed by
/// rule name. The full label of a rule is `"{category}.{rule}"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub rules: BTreeMap<String, String>,
}

/// A compiled taxonomy rule.
#[derive(Debug, Clone)]
pub struct TaxonomyRule {
    pub label: String,
    pub pattern: Regex,
}

/// Compiled taxonomy, ready for scoring.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    rules: Vec<TaxonomyRule>,
}

#[derive(Debug)]
pub enum TaxonomyError {
    /// No categories, or categories with no rules at all. Classifying against
    /// nothing is a caller mistake, not a data condition.
    Empty,
    /// A rule pattern failed to compile.
    InvalidPattern {
        label: String,
        source: regex::Error,
    },
}

impl fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyError::Empty => write!(f, "taxonomy has no rules"),
            TaxonomyError::InvalidPattern { label, source } => {
                write!(f, "invalid pattern for label '{}': {}", label, source)
            }
        }
    }
}

impl std::error::Error for TaxonomyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaxonomyError::Empty => None,
            TaxonomyError::InvalidPattern { source, .. } => Some(source),
        }
    }
}

impl Taxonomy {
    /// Compile a taxonomy from category specs. Patterns are matched against
    /// lowercased text, so they should be written in lowercase.
    pub fn new(categories: &[CategorySpec]) -> Result<Self, TaxonomyError> {
        let mut rules = Vec::new();

        for category in categories {
            for (rule_name, pattern) in &category.rules {
                let label = format!("{}.{}", category.name, rule_name);
                let pattern =
                    Regex::new(pattern).map_err(|source| TaxonomyError::InvalidPattern {
                        label: label.clone(),
                        source,
                    })?;
                rules.push(TaxonomyRule { label, pattern });
            }
        }

        if rules.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[TaxonomyRule] {
        &self.rules
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The council-audit rule table used by the surrounding migration tooling:
/// dates, council identity, financial line items, and signature blocks.
pub fn council_audit_spec() -> Vec<CategorySpec> {
    fn category(name: &str, rules: &[(&str, &str)]) -> CategorySpec {
        CategorySpec {
            name: name.to_string(),
            rules: rules
                .iter()
                .map(|(rule, pattern)| (rule.to_string(), pattern.to_string()))
                .collect(),
        }
    }

    vec![
        category(
            "date",
            &[
                ("day", r"day|date"),
                ("month", r"month"),
                ("year", r"year|20\s+_+"),
            ],
        ),
        category(
            "council_info",
            &[
                ("council_name", r"council\s+name|name\s+of\s+council"),
                ("council_number", r"council\s+number|number\s+of\s+council"),
                ("location", r"location|city|state"),
            ],
        ),
        category(
            "financial",
            &[
                ("cash", r"cash|funds?|money"),
                ("assets", r"assets?"),
                ("liabilities", r"liabilit(y|ies)"),
                ("total", r"total"),
                ("balance", r"balance"),
                ("amount", r"amount|\$"),
            ],
        ),
        category(
            "signature",
            &[
                ("grand_knight", r"grand\s+knight"),
                ("trustee", r"trustee"),
                ("signature", r"sign(ed|ature)"),
            ],
        ),
    ]
}
