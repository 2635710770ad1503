pub mod field;
pub mod report;
pub mod token;

pub use field::{FieldFlags, FieldKind, FieldRecord, Rect};
pub use report::{FieldReport, RectIssue, TemplateReport};
pub use token::ContextToken;
