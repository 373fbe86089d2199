//! Centermost boundary selection.
//!
//! Given a chunk and a separator, every match is a candidate cut. The one
//! whose start lies closest to the middle of the chunk wins, so each split
//! roughly halves the problem:
//!
//! ```text
//! Text:     "aa\n\nbbbbbb\n\ncc\n\ndddd"     (20 chars, midpoint 10)
//! Matches:     ^2      ^10   ^14
//! Distance:    8       0     4
//!                      ↑ selected
//! ```
//!
//! Distances are measured in characters, not bytes, so multi-byte text does
//! not drag the midpoint around. Ties go to the earlier match.
//!
//! When HTML stripping is enabled the selection still runs on the tagged
//! text. Markup shifts the midpoint slightly; the chunker accepts that.

use std::ops::Range;

use crate::Separator;

/// A separator match inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset where the match ends (exclusive).
    pub end: usize,
    /// Character offset where the match starts.
    pub char_start: usize,
}

impl Boundary {
    /// Length of the matched text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the match is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The byte range of the match.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// All matches of `separator` in `text`, annotated with character offsets.
pub fn find_boundaries(text: &str, separator: &Separator) -> Vec<Boundary> {
    let mut boundaries = Vec::new();
    // Matches arrive left to right, so character offsets accumulate.
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for range in separator.find_all(text) {
        if range.start < byte_pos
            || range.end < range.start
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            continue;
        }
        char_pos += text[byte_pos..range.start].chars().count();
        byte_pos = range.start;
        boundaries.push(Boundary {
            start: range.start,
            end: range.end,
            char_start: char_pos,
        });
    }

    boundaries
}

/// The match of `separator` closest to the character midpoint of `text`.
///
/// Returns `None` when the separator does not occur.
pub fn select_boundary(text: &str, separator: &Separator) -> Option<Boundary> {
    let boundaries = find_boundaries(text, separator);
    if boundaries.is_empty() {
        return None;
    }
    let char_len = text.chars().count();
    centermost(&boundaries, char_len)
}

/// Pick the boundary nearest `char_len / 2`.
///
/// Compares `|2 * start - len|` to keep the half-character midpoint of odd
/// lengths exact. `min_by_key` keeps the first of equal keys.
fn centermost(boundaries: &[Boundary], char_len: usize) -> Option<Boundary> {
    boundaries
        .iter()
        .min_by_key(|b| (2 * b.char_start).abs_diff(char_len))
        .copied()
}
