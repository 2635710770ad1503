//! End-to-end run over a miniature council audit form: analyze one revision,
//! then crosswalk it against a shifted second revision with renamed fields.

use fieldwalk::classify::{council_audit_spec, Taxonomy};
use fieldwalk::crosswalk::match_fields;
use fieldwalk::models::{ContextToken, FieldKind, FieldRecord, Rect};
use fieldwalk::pipeline::analyze_template;

fn field(name: &str, kind: FieldKind, x: f64, y: f64) -> FieldRecord {
    FieldRecord::new(name, kind, Some(Rect::new(x, y, 60.0, 12.0)))
}

fn token(text: &str, x: f64, y: f64) -> ContextToken {
    ContextToken::new(text, Rect::new(x, y, 30.0, 8.0))
}

/// June revision of the form, with the printed labels next to each field.
fn june_fields() -> Vec<FieldRecord> {
    vec![
        field("Text1", FieldKind::Text, 140.0, 720.0),
        field("Text2", FieldKind::Text, 520.0, 720.0),
        field("Text58", FieldKind::Text, 420.0, 430.0),
        field("Sig1", FieldKind::Signature, 120.0, 120.0),
    ]
}

fn june_tokens() -> Vec<ContextToken> {
    vec![
        token("Council", 100.0, 710.0),
        token("Number", 133.0, 710.0),
        token("Year", 480.0, 722.0),
        token("20", 585.0, 740.0),
        token("Total", 365.0, 432.0),
        token("Income", 398.0, 432.0),
        token("Grand", 65.0, 122.0),
        token("Knight", 98.0, 122.0),
    ]
}

/// December revision: same layout drifted by a point or two, new names,
/// one extra field the June form does not have.
fn december_fields() -> Vec<FieldRecord> {
    vec![
        field("Text101", FieldKind::Text, 141.0, 719.0),
        field("Text102", FieldKind::Text, 521.0, 721.0),
        field("Text158", FieldKind::Text, 419.0, 431.0),
        field("Sig201", FieldKind::Signature, 121.0, 119.0),
        field("Text999", FieldKind::Text, 300.0, 40.0),
    ]
}

#[test]
fn analysis_infers_purposes_from_printed_labels() {
    let taxonomy = Taxonomy::new(&council_audit_spec()).unwrap();
    let report = analyze_template(&june_fields(), &june_tokens(), &taxonomy, 30.0);

    assert_eq!(report.field_count(), 4);
    assert!(report.skipped.is_empty());

    assert_eq!(
        report.fields["Text1"].likely_purposes,
        vec!["council_info.council_number"]
    );
    assert_eq!(report.fields["Text58"].likely_purposes, vec!["financial.total"]);
    assert_eq!(
        report.fields["Sig1"].likely_purposes,
        vec!["signature.grand_knight"]
    );
    // Every score map covers the whole taxonomy and tops out at 1.0
    for entry in report.fields.values() {
        assert_eq!(entry.purpose_scores.len(), taxonomy.len());
        for score in entry.purpose_scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }
}

#[test]
fn crosswalk_recovers_the_renamed_fields() {
    let crosswalk = match_fields(&june_fields(), &december_fields(), 5.0).unwrap();

    let map = crosswalk.name_map();
    assert_eq!(map["Text1"], "Text101");
    assert_eq!(map["Text2"], "Text102");
    assert_eq!(map["Text58"], "Text158");
    assert_eq!(map["Sig1"], "Sig201");

    // The December-only field surfaces as data, not an error
    assert!(crosswalk.unmatched_source.is_empty());
    assert_eq!(crosswalk.unmatched_target, vec!["Text999"]);

    // Pairs come back closest-first
    for window in crosswalk.pairs.windows(2) {
        assert!(window[0].distance <= window[1].distance);
    }
}

#[test]
fn crosswalk_json_is_stable_across_runs() {
    let first = serde_json::to_string(
        &match_fields(&june_fields(), &december_fields(), 5.0).unwrap(),
    )
    .unwrap();
    let second = serde_json::to_string(
        &match_fields(&june_fields(), &december_fields(), 5.0).unwrap(),
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn report_serializes_with_the_wire_key_names() {
    let taxonomy = Taxonomy::new(&council_audit_spec()).unwrap();
    let report = analyze_template(&june_fields(), &june_tokens(), &taxonomy, 30.0);

    let json = serde_json::to_value(&report).unwrap();
    let entry = &json["fields"]["Text1"];
    assert_eq!(entry["type"], "text");
    assert!(entry["position"]["x"].is_number());
    assert!(entry["likely_purposes"].is_array());
    assert!(entry["purpose_scores"].is_object());
    assert!(entry["nearby_text"].is_array());
}
