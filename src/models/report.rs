//! Serializable analysis output records.
//!
//! These are the records handed to the persistence layer: one entry per
//! field with its geometry, flags, nearby text, and inferred purposes. Key
//! names match the JSON documents the surrounding migration tooling consumes
//! (`type`, `position`, `likely_purposes`, `purpose_scores`, `nearby_text`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::PurposeAssignment;
use crate::models::field::{FieldKind, FieldRecord, Rect};

/// Why a field was excluded from geometric computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectIssue {
    /// The extractor reported no rectangle at all.
    Missing,
    /// The rectangle has negative extent or non-finite coordinates.
    Malformed,
}

impl RectIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            RectIssue::Missing => "missing",
            RectIssue::Malformed => "malformed",
        }
    }

    /// Classify a field's rect, if there is anything wrong with it.
    pub fn of(field: &FieldRecord) -> Option<RectIssue> {
        match &field.rect {
            None => Some(RectIssue::Missing),
            Some(rect) if !rect.is_well_formed() => Some(RectIssue::Malformed),
            Some(_) => None,
        }
    }
}

/// Per-field analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReport {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub position: Option<Rect>,
    pub required: bool,
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub likely_purposes: Vec<String>,
    pub purpose_scores: BTreeMap<String, f64>,
    pub nearby_text: Vec<String>,
}

impl FieldReport {
    pub fn new(field: &FieldRecord, nearby_text: Vec<String>, purpose: PurposeAssignment) -> Self {
        Self {
            kind: field.kind,
            position: field.rect,
            required: field.flags.required(),
            read_only: field.flags.read_only(),
            value: field.value.clone(),
            options: field.options.clone(),
            likely_purposes: purpose.likely_purposes,
            purpose_scores: purpose.scores,
            nearby_text,
        }
    }
}

/// Full analysis of one template revision: one record per field, plus
/// diagnostics for fields whose rects could not be used. BTreeMaps keep the
/// serialized output byte-stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateReport {
    pub fields: BTreeMap<String, FieldReport>,
    pub skipped: BTreeMap<String, RectIssue>,
}

impl TemplateReport {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
