//! Positioned text token.
//!
//! Represents a single word reported by the page text layer, with its own
//! bounding box. Tokens are ephemeral: produced on demand for one context
//! query and owned by whatever field context they end up in.

use serde::{Deserialize, Serialize};

use crate::models::field::Rect;

/// A word on the page with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextToken {
    pub text: String,
    pub rect: Rect,
}

impl ContextToken {
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}
