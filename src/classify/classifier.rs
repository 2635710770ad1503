//! Keyword scoring over nearby text.
//!
//! Joins a field's nearby tokens into one lowercase blob and counts
//! non-overlapping pattern matches per taxonomy rule. Repeated occurrences
//! raise confidence; the labels tied at the maximum count become the field's
//! likely purposes. A coarse bag-of-keywords signal, reviewed by a human
//! before it drives any financial field mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::taxonomy::Taxonomy;
use crate::models::token::ContextToken;

/// Purpose scores for one field. `scores` holds every taxonomy label with a
/// normalized score in [0, 1]; `likely_purposes` is the subset achieving the
/// maximum raw count, empty when nothing matched at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurposeAssignment {
    pub likely_purposes: Vec<String>,
    pub scores: BTreeMap<String, f64>,
}

impl PurposeAssignment {
    pub fn is_unclassified(&self) -> bool {
        self.likely_purposes.is_empty()
    }
}

/// Score a field's nearby tokens against the taxonomy.
pub fn classify(taxonomy: &Taxonomy, tokens: &[ContextToken]) -> PurposeAssignment {
    let blob = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    classify_text(taxonomy, &blob)
}

/// Score an already-joined lowercase text blob. Split out so rule tables can
/// be exercised on raw text.
pub fn classify_text(taxonomy: &Taxonomy, blob: &str) -> PurposeAssignment {
    let mut raw: BTreeMap<&str, usize> = BTreeMap::new();
    for rule in taxonomy.rules() {
        // Empty text asserts nothing, even against patterns that can match
        // the empty string.
        let count = if blob.is_empty() {
            0
        } else {
            rule.pattern.find_iter(blob).count()
        };
        raw.insert(rule.label.as_str(), count);
    }

    let max = raw.values().copied().max().unwrap_or(0);

    let likely_purposes = if max == 0 {
        Vec::new()
    } else {
        raw.iter()
            .filter(|(_, &count)| count == max)
            .map(|(&label, _)| label.to_string())
            .collect()
    };

    let scores = raw
        .into_iter()
        .map(|(label, count)| {
            let score = if max == 0 {
                0.0
            } else {
                count as f64 / max as f64
            };
            (label.to_string(), score)
        })
        .collect();

    PurposeAssignment {
        likely_purposes,
        scores,
    }
}
