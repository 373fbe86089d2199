//! Cutting a chunk in two at a selected boundary.
//!
//! The separator's [`Behavior`] decides which side keeps the matched text:
//!
//! ```text
//! content:  "one. two"      match ". " at 3..5
//!
//! Prefix:   cut 3 | 3   ->  "one"   ". two"
//! Suffix:   cut 5 | 5   ->  "one. " "two"
//! Remove:   cut 3 | 5   ->  "one"   "two"
//! ```
//!
//! Both halves are trimmed, so whitespace at the cut never survives.

use crate::{Behavior, Boundary};

/// Byte offsets `(first_end, second_start)` for a cut at `boundary`.
#[must_use]
pub fn split_offsets(boundary: &Boundary, behavior: Behavior) -> (usize, usize) {
    match behavior {
        Behavior::Prefix => (boundary.start, boundary.start),
        Behavior::Suffix => (boundary.end, boundary.end),
        Behavior::Remove => (boundary.start, boundary.end),
    }
}

/// Split `content` at `boundary` and trim both halves.
///
/// `boundary` must come from matching against `content` itself.
#[must_use]
pub fn split_content<'a>(
    content: &'a str,
    boundary: &Boundary,
    behavior: Behavior,
) -> (&'a str, &'a str) {
    let (first_end, second_start) = split_offsets(boundary, behavior);
    (content[..first_end].trim(), content[second_start..].trim())
}
