//! Form field data model.
//!
//! Represents one extracted form field: name, declared type, page-coordinate
//! bounding rectangle, and acro-field flags. Records are produced once per
//! extraction pass and never mutated afterwards; downstream components attach
//! their own results keyed by field name.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rect is usable for geometry: finite coordinates and
    /// non-negative extent. Width/height of zero is allowed (point fields).
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Grow the rect outward by `margin` on all four sides.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Open-interval overlap test on both axes. Boxes that merely touch at
    /// an edge or corner do not overlap. Symmetric in its arguments.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Euclidean distance between rect origins.
    pub fn origin_distance(&self, other: &Rect) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Declared field type, as reported by the extraction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Dropdown,
    Multiselect,
    Signature,
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Multiselect => "multiselect",
            FieldKind::Signature => "signature",
            FieldKind::Unknown => "unknown",
        }
    }
}

/// Raw acro-field flag word. Bit 0 = required, bit 1 = read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldFlags(pub u32);

impl FieldFlags {
    pub const REQUIRED: u32 = 1;
    pub const READ_ONLY: u32 = 1 << 1;

    pub fn required(&self) -> bool {
        self.0 & Self::REQUIRED != 0
    }

    pub fn read_only(&self) -> bool {
        self.0 & Self::READ_ONLY != 0
    }
}

/// One extracted form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Unique within one template; not stable across template revisions.
    pub name: String,
    pub kind: FieldKind,
    /// Fields can arrive without a position (e.g. a malformed /Rect entry
    /// the extractor could not read).
    pub rect: Option<Rect>,
    #[serde(default)]
    pub flags: FieldFlags,
    #[serde(default)]
    pub page: u32,
    /// Current field value, if the template was filled. Carried through to
    /// reports, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Choice options for dropdown/multiselect fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldRecord {
    pub fn new(name: impl Into<String>, kind: FieldKind, rect: Option<Rect>) -> Self {
        Self {
            name: name.into(),
            kind,
            rect,
            flags: FieldFlags::default(),
            page: 0,
            value: None,
            options: None,
        }
    }

    /// The rect, if present and geometrically usable.
    pub fn well_formed_rect(&self) -> Option<&Rect> {
        self.rect.as_ref().filter(|r| r.is_well_formed())
    }
}
