//! Nearby-text resolution.
//!
//! Given a field's rectangle and the positioned words of its page, collect
//! the words whose boxes fall inside a margin-expanded search window around
//! the field. The surrounding printed text is the proxy signal the purpose
//! classifier scores against.

use crate::models::field::Rect;
use crate::models::token::ContextToken;

/// Collect tokens whose boxes overlap the search window built by expanding
/// `rect` outward by `margin` on all four sides.
///
/// Overlap is open-interval on both axes, so a token that merely touches the
/// window edge is excluded. Output preserves the input token order (the text
/// layer's extraction order); callers needing spatial order must sort.
pub fn find_nearby_tokens(rect: &Rect, tokens: &[ContextToken], margin: f64) -> Vec<ContextToken> {
    let window = rect.expand(margin);

    tokens
        .iter()
        .filter(|token| window.overlaps(&token.rect))
        .cloned()
        .collect()
}
