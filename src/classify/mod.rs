pub mod classifier;
pub mod taxonomy;

pub use classifier::{classify, classify_text, PurposeAssignment};
pub use taxonomy::{council_audit_spec, CategorySpec, Taxonomy, TaxonomyError};
