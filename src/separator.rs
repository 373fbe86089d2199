//! Separator catalog: where a chunk may be cut, and how.
//!
//! A separator is a pattern plus a [`Behavior`] describing what happens to
//! the matched text when the chunk is cut there:
//!
//! ```text
//! Text:   "First sentence. Second sentence."
//! Match:                 ". "
//!
//! Prefix: ["First sentence", ". Second sentence."]   match opens the second half
//! Suffix: ["First sentence. ", "Second sentence."]   match closes the first half
//! Remove: ["First sentence", "Second sentence."]     match is dropped
//! ```
//!
//! (Halves are trimmed afterwards, so the trailing space in the Suffix case
//! disappears.)
//!
//! ## Ordering
//!
//! A catalog lists separators from the most preferred boundary to the least.
//! The chunker always tries them in order, so a paragraph break beats a line
//! break, which beats a sentence end, and so on down to a single character.
//!
//! ## Swappable Matching
//!
//! Matching goes through the [`Pattern`] trait. `regex::Regex` implements it
//! and so does [`Literal`]; anything else that can report non-overlapping
//! byte ranges can be plugged in with [`Separator::new`].

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use crate::Result;

/// Where the cut falls relative to a separator match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// The matched text begins the second half.
    Prefix,
    /// The matched text ends the first half.
    Suffix,
    /// The matched text is discarded.
    Remove,
}

/// A "find all matches" primitive.
///
/// Implementations return byte ranges into `text` that are non-overlapping,
/// in left-to-right order, and lie on `char` boundaries. Empty matches carry
/// no boundary information and should be omitted.
pub trait Pattern: Send + Sync + fmt::Debug {
    /// Find every match of this pattern in `text`.
    fn find_all(&self, text: &str) -> Vec<Range<usize>>;
}

impl Pattern for Regex {
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self.find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }
}

/// A plain substring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(String);

impl Literal {
    /// Create a literal pattern.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Pattern for Literal {
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        if self.0.is_empty() {
            return Vec::new();
        }
        text.match_indices(self.0.as_str())
            .map(|(start, m)| start..start + m.len())
            .collect()
    }
}

/// A pattern paired with its cut behavior.
///
/// Cloning is cheap: the pattern is shared.
#[derive(Debug, Clone)]
pub struct Separator {
    pattern: Arc<dyn Pattern>,
    behavior: Behavior,
}

impl Separator {
    /// Create a separator from any [`Pattern`] implementation.
    pub fn new(pattern: Arc<dyn Pattern>, behavior: Behavior) -> Self {
        Self { pattern, behavior }
    }

    /// Compile a regular expression separator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if the expression
    /// does not compile.
    pub fn regex(pattern: &str, behavior: Behavior) -> Result<Self> {
        Ok(Self::new(Arc::new(Regex::new(pattern)?), behavior))
    }

    /// Create a literal substring separator.
    pub fn literal(text: impl Into<String>, behavior: Behavior) -> Self {
        Self::new(Arc::new(Literal::new(text)), behavior)
    }

    /// The cut behavior.
    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// The underlying pattern.
    #[must_use]
    pub fn pattern(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    /// Find every match of this separator in `text`.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self.pattern.find_all(text)
    }

    fn builtin(pattern: &str, behavior: Behavior) -> Self {
        let regex = Regex::new(pattern).expect("valid built-in separator regex");
        Self::new(Arc::new(regex), behavior)
    }
}

/// Separators in priority order, most preferred first.
///
/// ## Example
///
/// ```rust
/// use midsplit::{Behavior, Separator, SeparatorCatalog};
///
/// let catalog = SeparatorCatalog::new(vec![
///     Separator::literal("\n\n", Behavior::Remove),
///     Separator::regex(r"[.!?]\s+", Behavior::Suffix).unwrap(),
/// ]);
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SeparatorCatalog {
    separators: Vec<Separator>,
}

impl SeparatorCatalog {
    /// Create a catalog from separators in priority order.
    ///
    /// An empty catalog is allowed; with it, any chunk over budget is
    /// unsplittable.
    #[must_use]
    pub fn new(separators: Vec<Separator>) -> Self {
        Self { separators }
    }

    /// Separators for plain prose: paragraphs, lines, sentences, clauses,
    /// words, then single characters.
    #[must_use]
    pub fn prose() -> Self {
        Self::new(prose_separators())
    }

    /// Separators for Markdown: headings and fences first, then prose.
    #[must_use]
    pub fn markdown() -> Self {
        let mut separators = vec![
            Separator::builtin(r"\n#{1,6} ", Behavior::Prefix),
            Separator::builtin(r"\n(?:-{3,}|`{3})", Behavior::Prefix),
        ];
        separators.extend(prose_separators());
        Self::new(separators)
    }

    /// Separators for HTML-bearing text: block closers and breaks first,
    /// then prose.
    #[must_use]
    pub fn html() -> Self {
        let mut separators = vec![
            Separator::builtin(
                r"(?i)</(?:p|div|section|article|li|tr|table|ul|ol|h[1-6])>",
                Behavior::Suffix,
            ),
            Separator::builtin(r"(?i)<br\s*/?>", Behavior::Remove),
            Separator::builtin(r"(?i)<hr\s*/?>", Behavior::Remove),
        ];
        separators.extend(prose_separators());
        Self::new(separators)
    }

    /// Append a separator at the lowest priority.
    #[must_use]
    pub fn with(mut self, separator: Separator) -> Self {
        self.separators.push(separator);
        self
    }

    /// Iterate separators in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Separator> {
        self.separators.iter()
    }

    /// Number of separators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.separators.len()
    }

    /// Whether the catalog has no separators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }
}

impl Default for SeparatorCatalog {
    fn default() -> Self {
        Self::prose()
    }
}

impl<'a> IntoIterator for &'a SeparatorCatalog {
    type Item = &'a Separator;
    type IntoIter = std::slice::Iter<'a, Separator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn prose_separators() -> Vec<Separator> {
    vec![
        Separator::builtin(r"\n{2,}", Behavior::Remove),
        Separator::builtin(r"\n", Behavior::Remove),
        Separator::builtin(r"[.!?]+\s+", Behavior::Suffix),
        Separator::builtin(r"[;:,]\s+", Behavior::Suffix),
        Separator::builtin(r"\s+", Behavior::Remove),
        Separator::builtin(r"(?s).", Behavior::Prefix),
    ]
}
