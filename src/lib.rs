//! Form-field semantic crosswalk for council audit templates.
//!
//! Two independently authored revisions of the same paper form digitize into
//! field sets with unrelated names. This crate matches fields across
//! revisions by rectangle proximity and infers what each field represents
//! (a date, a council number, a monetary total, a signature) from the
//! printed text near it.
//!
//! The core is pure, synchronous computation over already-extracted records:
//! PDF parsing, file I/O, and persistence belong to the callers (see the
//! `fieldwalk` binary for the JSON-file glue).

pub mod classify;
pub mod context;
pub mod crosswalk;
pub mod models;
pub mod pipeline;

pub use classify::{classify, council_audit_spec, CategorySpec, PurposeAssignment, Taxonomy};
pub use context::find_nearby_tokens;
pub use crosswalk::{match_fields, Crosswalk, MatchedPair};
pub use models::{ContextToken, FieldFlags, FieldKind, FieldRecord, Rect, TemplateReport};
pub use pipeline::analyze_template;
