//! Per-template analysis pipeline.
//!
//! Batch composition of the context resolver and the purpose classifier:
//! for every extracted field, collect the printed text near its rectangle,
//! score it against the taxonomy, and emit one report record. Pure function
//! of its inputs; all I/O lives with the caller.

use log::{debug, warn};

use crate::classify::{classify, Taxonomy};
use crate::context::find_nearby_tokens;
use crate::models::field::FieldRecord;
use crate::models::report::{FieldReport, RectIssue, TemplateReport};
use crate::models::token::ContextToken;

/// Analyze one template revision: context resolution and purpose scoring per
/// field. Fields whose rect is missing or malformed are excluded from
/// geometry, reported with empty context and an all-zero assignment, and
/// listed in the `skipped` diagnostics. Margin is the caller's choice; page
/// coordinate scale varies by document family.
pub fn analyze_template(
    fields: &[FieldRecord],
    tokens: &[ContextToken],
    taxonomy: &Taxonomy,
    margin: f64,
) -> TemplateReport {
    let mut report = TemplateReport::default();

    for field in fields {
        if let Some(issue) = RectIssue::of(field) {
            warn!(
                "field '{}' excluded from context resolution: {} rect",
                field.name,
                issue.as_str()
            );
            report.skipped.insert(field.name.clone(), issue);
        }

        let nearby = match field.well_formed_rect() {
            Some(rect) => find_nearby_tokens(rect, tokens, margin),
            None => Vec::new(),
        };

        // No nearby text is a valid outcome; classify scores it all-zero.
        let purpose = classify(taxonomy, &nearby);

        debug!(
            "field '{}' ({}): {} nearby tokens, likely purposes {:?}",
            field.name,
            field.kind.as_str(),
            nearby.len(),
            purpose.likely_purposes
        );

        let nearby_text = nearby.into_iter().map(|t| t.text).collect();
        report
            .fields
            .insert(field.name.clone(), FieldReport::new(field, nearby_text, purpose));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::council_audit_spec;
    use crate::models::field::{FieldKind, Rect};

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(&council_audit_spec()).unwrap()
    }

    fn token(text: &str, x: f64, y: f64) -> ContextToken {
        ContextToken::new(text, Rect::new(x, y, 28.0, 8.0))
    }

    #[test]
    fn classifies_fields_from_their_surroundings() {
        let fields = vec![
            FieldRecord::new("Text1", FieldKind::Text, Some(Rect::new(100.0, 100.0, 60.0, 12.0))),
            FieldRecord::new("Sig1", FieldKind::Signature, Some(Rect::new(100.0, 400.0, 120.0, 20.0))),
        ];
        let tokens = vec![
            token("Council", 60.0, 95.0),
            token("Number", 92.0, 95.0),
            token("Grand", 60.0, 395.0),
            token("Knight", 92.0, 395.0),
        ];

        let report = analyze_template(&fields, &tokens, &taxonomy(), 30.0);

        assert_eq!(report.field_count(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(
            report.fields["Text1"].likely_purposes,
            vec!["council_info.council_number"]
        );
        assert_eq!(
            report.fields["Sig1"].likely_purposes,
            vec!["signature.grand_knight"]
        );
        assert_eq!(report.fields["Text1"].nearby_text, vec!["Council", "Number"]);
    }

    #[test]
    fn rectless_field_is_reported_with_empty_context() {
        let fields = vec![FieldRecord::new("Orphan", FieldKind::Checkbox, None)];
        let tokens = vec![token("total", 0.0, 0.0)];

        let report = analyze_template(&fields, &tokens, &taxonomy(), 20.0);

        assert_eq!(report.skipped["Orphan"], RectIssue::Missing);
        let entry = &report.fields["Orphan"];
        assert!(entry.nearby_text.is_empty());
        assert!(entry.likely_purposes.is_empty());
        assert!(entry.purpose_scores.values().all(|&s| s == 0.0));
    }

    #[test]
    fn malformed_rect_is_diagnosed_but_field_still_reported() {
        let fields = vec![FieldRecord::new(
            "Bad",
            FieldKind::Text,
            Some(Rect::new(10.0, 10.0, f64::NAN, 5.0)),
        )];

        let report = analyze_template(&fields, &[], &taxonomy(), 20.0);

        assert_eq!(report.skipped["Bad"], RectIssue::Malformed);
        assert!(report.fields.contains_key("Bad"));
    }

    #[test]
    fn report_carries_flags_and_kind() {
        use crate::models::field::FieldFlags;

        let mut field = FieldRecord::new(
            "Dues",
            FieldKind::Text,
            Some(Rect::new(50.0, 50.0, 40.0, 12.0)),
        );
        field.flags = FieldFlags(FieldFlags::REQUIRED | FieldFlags::READ_ONLY);
        field.value = Some("125.00".to_string());

        let report = analyze_template(&[field], &[], &taxonomy(), 20.0);
        let entry = &report.fields["Dues"];
        assert_eq!(entry.kind, FieldKind::Text);
        assert!(entry.required);
        assert!(entry.read_only);
        assert_eq!(entry.value.as_deref(), Some("125.00"));
    }
}
