//! Position-based field correspondence between two template revisions.
//!
//! Field names are not stable across revisions of the same paper form, but
//! field positions nearly are. The matcher pairs each source field with the
//! closest target field by rect-origin distance, greedy over the globally
//! sorted candidate list. Deliberately not an optimal-assignment solver:
//! "closest visual position wins" is the documented policy, and revisions of
//! one document are near-bijective anyway.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::field::FieldRecord;
use crate::models::report::RectIssue;

/// One accepted correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub source: String,
    pub target: String,
    pub distance: f64,
}

/// Result of one crosswalk run. Unmatched fields are data, not errors:
/// template revisions legitimately add and remove fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crosswalk {
    /// Accepted pairs, ascending by distance (ties by source then target name).
    pub pairs: Vec<MatchedPair>,
    /// Positioned source fields no pair was accepted for, sorted by name.
    pub unmatched_source: Vec<String>,
    /// Positioned target fields no pair was accepted for, sorted by name.
    pub unmatched_target: Vec<String>,
    /// Source fields excluded from matching, with the reason.
    pub skipped_source: BTreeMap<String, RectIssue>,
    /// Target fields excluded from matching, with the reason.
    pub skipped_target: BTreeMap<String, RectIssue>,
}

impl Crosswalk {
    /// Flat source-name → target-name mapping, the shape downstream form
    /// fillers consume.
    pub fn name_map(&self) -> BTreeMap<String, String> {
        self.pairs
            .iter()
            .map(|p| (p.source.clone(), p.target.clone()))
            .collect()
    }
}

#[derive(Debug, PartialEq)]
pub enum MatchError {
    /// The acceptance threshold must be a finite, positive distance. There is
    /// no default: coordinate scale and inter-revision drift vary per
    /// document family, and a silent fallback could mis-map financial fields.
    InvalidThreshold(f64),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidThreshold(value) => {
                write!(f, "match threshold must be finite and > 0, got {}", value)
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Compute the field correspondence between two independently extracted
/// field sets. Candidate pairs are those with rect-origin distance strictly
/// below `threshold`; they are accepted greedily in ascending distance order,
/// each field consumed at most once. Deterministic for identical inputs.
pub fn match_fields(
    source: &[FieldRecord],
    target: &[FieldRecord],
    threshold: f64,
) -> Result<Crosswalk, MatchError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(MatchError::InvalidThreshold(threshold));
    }

    let (source_positioned, skipped_source) = split_positioned(source);
    let (target_positioned, skipped_target) = split_positioned(target);

    // All-pairs scan; candidate set is every pair under the threshold.
    let mut candidates: Vec<MatchedPair> = Vec::new();
    for (source_name, source_rect) in &source_positioned {
        for (target_name, target_rect) in &target_positioned {
            let distance = source_rect.origin_distance(target_rect);
            if distance < threshold {
                candidates.push(MatchedPair {
                    source: (*source_name).to_string(),
                    target: (*target_name).to_string(),
                    distance,
                });
            }
        }
    }

    // Ascending distance, ties broken by source then target name so the
    // result does not depend on input iteration order.
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });

    let mut used_source: HashSet<&str> = HashSet::new();
    let mut used_target: HashSet<&str> = HashSet::new();
    let mut pairs: Vec<MatchedPair> = Vec::new();

    for candidate in &candidates {
        if used_source.contains(candidate.source.as_str())
            || used_target.contains(candidate.target.as_str())
        {
            continue;
        }
        used_source.insert(candidate.source.as_str());
        used_target.insert(candidate.target.as_str());
        pairs.push(candidate.clone());
    }

    debug!(
        "crosswalk: {} candidates under threshold {}, {} accepted",
        candidates.len(),
        threshold,
        pairs.len()
    );

    let mut unmatched_source: Vec<String> = source_positioned
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !used_source.contains(name))
        .map(str::to_string)
        .collect();
    let mut unmatched_target: Vec<String> = target_positioned
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !used_target.contains(name))
        .map(str::to_string)
        .collect();
    unmatched_source.sort();
    unmatched_target.sort();

    Ok(Crosswalk {
        pairs,
        unmatched_source,
        unmatched_target,
        skipped_source,
        skipped_target,
    })
}

/// Partition fields into (name, rect) entries usable for matching and a
/// diagnostics map for the rest.
fn split_positioned(
    fields: &[FieldRecord],
) -> (
    Vec<(&str, &crate::models::field::Rect)>,
    BTreeMap<String, RectIssue>,
) {
    let mut positioned = Vec::new();
    let mut skipped = BTreeMap::new();

    for field in fields {
        if let Some(issue) = RectIssue::of(field) {
            skipped.insert(field.name.clone(), issue);
        } else if let Some(rect) = field.well_formed_rect() {
            positioned.push((field.name.as_str(), rect));
        }
    }

    (positioned, skipped)
}
