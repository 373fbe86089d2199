//! Token-bounded recursive splitting at the centermost boundary.
//!
//! ## The Algorithm
//!
//! Start with the whole (normalized, trimmed) document as one chunk. Then,
//! for any chunk over budget:
//!
//! ```text
//! for separator in catalog (most preferred first):
//!     boundary = match of separator nearest the chunk's midpoint
//!     skip if no match, or the match sits at offset 0
//!     (left, right) = cut at boundary, trim both
//!     skip if either half is below the minimum percentage of the budget
//!     skip if either half is not strictly shorter than the chunk
//!     recurse on left, then right; concatenate
//!     done
//! no separator worked: the chunk is unsplittable -> error
//! ```
//!
//! Cutting near the center keeps the recursion shallow (each accepted split
//! roughly halves the text) and gives balanced chunks. Recursing left before
//! right means the results come back in document order, so indices are a
//! plain enumeration at the end.
//!
//! ## Token Accounting
//!
//! Every count includes the chunk header, because the header ships with
//! every chunk. With HTML stripping on, counts are taken on stripped text
//! while matching and cutting stay on the tagged text.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::boundary::select_boundary;
use crate::split::split_content;
use crate::{
    Document, DocumentChunk, Error, Metadata, RegexTagStripper, Result, SeparatorCatalog,
    TagStripper, TokenBudget, TokenCounter, WordCounter,
};

/// Characters of an unsplittable chunk quoted in the error.
const PREVIEW_CHARS: usize = 48;

/// Splits documents into chunks that fit a token budget.
///
/// ## Example
///
/// ```rust
/// use midsplit::{CharCounter, Chunker};
///
/// let chunker = Chunker::builder(8).token_counter(CharCounter).build().unwrap();
/// let chunks = chunker.chunk("AAAA\n\nBBBB").unwrap();
///
/// let texts: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
/// assert_eq!(texts, ["AAAA", "BBBB"]);
/// ```
#[derive(Clone)]
pub struct Chunker {
    budget: TokenBudget,
    separators: SeparatorCatalog,
    counter: Arc<dyn TokenCounter>,
    stripper: Option<Arc<dyn TagStripper>>,
    header: Option<String>,
}

/// A piece of the seed text awaiting emission.
#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    text: &'a str,
    token_count: usize,
}

/// Whether `half` is a non-empty, strictly shorter part of `whole`.
fn shrinks(whole: &Piece<'_>, half: &Piece<'_>) -> bool {
    !half.text.is_empty() && half.text.len() < whole.text.len()
}

impl Chunker {
    /// Start configuring a chunker with the given budget.
    pub fn builder(budget: impl Into<TokenBudget>) -> ChunkerBuilder {
        ChunkerBuilder::new(budget.into())
    }

    /// The token budget.
    #[must_use]
    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    /// The separator catalog.
    #[must_use]
    pub fn separators(&self) -> &SeparatorCatalog {
        &self.separators
    }

    /// The token counter.
    #[must_use]
    pub fn token_counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    /// Whether chunk content is HTML-stripped.
    #[must_use]
    pub fn strips_html(&self) -> bool {
        self.stripper.is_some()
    }

    /// Chunk `text` with the default header and no metadata.
    ///
    /// # Errors
    ///
    /// See [`Chunker::chunk_document`].
    pub fn chunk(&self, text: &str) -> Result<Vec<DocumentChunk>> {
        self.chunk_document(Document::new(text))
    }

    /// Chunk a document.
    ///
    /// Line endings are normalized to `\n` and the text is trimmed before
    /// splitting. Empty documents produce no chunks.
    ///
    /// # Errors
    ///
    /// - [`Error::HeaderTooLarge`] if the header alone uses the whole budget.
    ///   Checked before any content is processed.
    /// - [`Error::Unsplittable`] if some chunk is over budget and no
    ///   separator produces an acceptable split. No partial result is
    ///   returned.
    pub fn chunk_document(&self, document: Document<'_>) -> Result<Vec<DocumentChunk>> {
        let header = document.header.or(self.header.as_deref()).unwrap_or("");
        let max_tokens = self.budget.max_tokens();

        let header_tokens = self.counter.count(header);
        if header_tokens >= max_tokens {
            return Err(Error::HeaderTooLarge {
                header_tokens,
                max_tokens,
            });
        }

        let normalized = normalize_line_endings(document.content);
        let text = normalized.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let seed = Piece {
            text,
            token_count: self.count_tokens(header, text),
        };
        debug!(
            tokens = seed.token_count,
            max_tokens,
            header_tokens,
            counter = self.counter.name(),
            "chunking document"
        );

        let pieces = self.subdivide(header, seed)?;
        let chunks = self.finalize(header, pieces, document.metadata);

        debug!(chunks = chunks.len(), "chunking complete");
        Ok(chunks)
    }

    /// Tokens for `content` emitted under `header`, as compared with the budget.
    pub fn count_tokens(&self, header: &str, content: &str) -> usize {
        let content = match &self.stripper {
            Some(stripper) => Cow::Owned(stripper.strip(content)),
            None => Cow::Borrowed(content),
        };
        if header.is_empty() {
            self.counter.count(&content)
        } else {
            self.counter.count(&format!("{header}{content}"))
        }
    }

    /// Split `piece` until every part fits, returning parts in document order.
    fn subdivide<'a>(&self, header: &str, piece: Piece<'a>) -> Result<Vec<Piece<'a>>> {
        if self.budget.fits(piece.token_count) {
            return Ok(vec![piece]);
        }

        for separator in &self.separators {
            let Some(boundary) = select_boundary(piece.text, separator) else {
                continue;
            };
            if boundary.start == 0 {
                trace!(behavior = ?separator.behavior(), "rejected split at start of chunk");
                continue;
            }

            let (left, right) = split_content(piece.text, &boundary, separator.behavior());
            let left = Piece {
                text: left,
                token_count: self.count_tokens(header, left),
            };
            let right = Piece {
                text: right,
                token_count: self.count_tokens(header, right),
            };

            if !self.budget.meets_minimum(left.token_count)
                || !self.budget.meets_minimum(right.token_count)
            {
                trace!(
                    left = left.token_count,
                    right = right.token_count,
                    min_percent = self.budget.min_chunk_percent(),
                    "rejected split below minimum chunk size"
                );
                continue;
            }
            // Both halves non-empty and strictly shorter.
            if !shrinks(&piece, &left) || !shrinks(&piece, &right) {
                trace!(
                    len = piece.text.len(),
                    left = left.text.len(),
                    right = right.text.len(),
                    "rejected split that does not shrink the chunk"
                );
                continue;
            }

            debug!(
                tokens = piece.token_count,
                left = left.token_count,
                right = right.token_count,
                at = boundary.char_start,
                "split chunk"
            );
            let mut parts = self.subdivide(header, left)?;
            parts.extend(self.subdivide(header, right)?);
            return Ok(parts);
        }

        warn!(
            tokens = piece.token_count,
            max_tokens = self.budget.max_tokens(),
            separators = self.separators.len(),
            "no separator could split chunk"
        );
        Err(Error::Unsplittable {
            token_count: piece.token_count,
            max_tokens: self.budget.max_tokens(),
            preview: piece.text.chars().take(PREVIEW_CHARS).collect(),
        })
    }

    /// Attach header, strip markup, and number the pieces.
    fn finalize(
        &self,
        header: &str,
        pieces: Vec<Piece<'_>>,
        metadata: Option<Arc<Metadata>>,
    ) -> Vec<DocumentChunk> {
        pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| {
                let body = match &self.stripper {
                    Some(stripper) => Cow::Owned(stripper.strip(piece.text)),
                    None => Cow::Borrowed(piece.text),
                };
                let content = format!("{header}{body}");
                DocumentChunk::new(index, content, piece.token_count)
                    .with_metadata(metadata.clone())
            })
            .collect()
    }
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("budget", &self.budget)
            .field("separators", &self.separators.len())
            .field("counter", &self.counter.name())
            .field("strip_html", &self.strips_html())
            .field("header", &self.header)
            .finish()
    }
}

/// Builder for [`Chunker`].
///
/// Defaults: prose separators, [`WordCounter`], no HTML stripping, no
/// header, and [`TokenBudget::DEFAULT_MIN_PERCENT`].
///
/// ```rust
/// use midsplit::{CharCounter, Chunker, SeparatorCatalog};
///
/// let chunker = Chunker::builder(256)
///     .min_chunk_percent(20)
///     .separators(SeparatorCatalog::html())
///     .strip_html(true)
///     .token_counter(CharCounter)
///     .header("Doc: guide\n")
///     .build()
///     .unwrap();
/// assert!(chunker.strips_html());
/// ```
pub struct ChunkerBuilder {
    budget: TokenBudget,
    min_chunk_percent: Option<u32>,
    separators: SeparatorCatalog,
    counter: Arc<dyn TokenCounter>,
    strip_html: bool,
    stripper: Arc<dyn TagStripper>,
    header: Option<String>,
}

impl ChunkerBuilder {
    fn new(budget: TokenBudget) -> Self {
        Self {
            budget,
            min_chunk_percent: None,
            separators: SeparatorCatalog::default(),
            counter: Arc::new(WordCounter),
            strip_html: false,
            stripper: Arc::new(RegexTagStripper::new()),
            header: None,
        }
    }

    /// Reject splits where either half is below `percent` of the budget.
    #[must_use]
    pub fn min_chunk_percent(mut self, percent: u32) -> Self {
        self.min_chunk_percent = Some(percent);
        self
    }

    /// Use `separators` instead of the prose catalog.
    #[must_use]
    pub fn separators(mut self, separators: SeparatorCatalog) -> Self {
        self.separators = separators;
        self
    }

    /// Count tokens with `counter`.
    #[must_use]
    pub fn token_counter(self, counter: impl TokenCounter + 'static) -> Self {
        self.shared_token_counter(Arc::new(counter))
    }

    /// Count tokens with a shared counter.
    #[must_use]
    pub fn shared_token_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = counter;
        self
    }

    /// Count and emit HTML-stripped text.
    #[must_use]
    pub fn strip_html(mut self, strip: bool) -> Self {
        self.strip_html = strip;
        self
    }

    /// Strip markup with `stripper` (only used when stripping is on).
    #[must_use]
    pub fn tag_stripper(mut self, stripper: impl TagStripper + 'static) -> Self {
        self.stripper = Arc::new(stripper);
        self
    }

    /// Header prepended to every chunk unless a document supplies its own.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBudget`] if the budget is zero.
    /// - [`Error::Budget`] if the minimum percentage exceeds 100.
    pub fn build(self) -> Result<Chunker> {
        if self.budget.max_tokens() == 0 {
            return Err(Error::InvalidBudget(0));
        }
        let budget = match self.min_chunk_percent {
            Some(percent) => self.budget.with_min_percent(percent)?,
            None => self.budget,
        };

        Ok(Chunker {
            budget,
            separators: self.separators,
            counter: self.counter,
            stripper: self.strip_html.then_some(self.stripper),
            header: self.header,
        })
    }
}

/// Canonicalize `\r\n` and lone `\r` line breaks to `\n`.
///
/// ```rust
/// use midsplit::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Behavior, CharCounter, Separator};

    fn char_chunker(max_tokens: usize) -> ChunkerBuilder {
        Chunker::builder(max_tokens).token_counter(CharCounter)
    }

    fn texts(chunks: &[DocumentChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_paragraph_split() {
        let chunker = char_chunker(8).build().unwrap();
        let chunks = chunker.chunk("AAAA\n\nBBBB").unwrap();
        assert_eq!(texts(&chunks), ["AAAA", "BBBB"]);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[1].index, 1);
        assert_eq!(chunks[0].token_count, 4);
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunker = char_chunker(100).header("H: ").build().unwrap();
        let chunks = chunker.chunk("  Small text.\n").unwrap();
        assert_eq!(texts(&chunks), ["H: Small text."]);
        assert_eq!(chunks[0].token_count, 14);
    }

    #[test]
    fn test_empty_text() {
        let chunker = char_chunker(10).build().unwrap();
        assert!(chunker.chunk("").unwrap().is_empty());
        assert!(chunker.chunk(" \r\n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_header_counts_against_budget() {
        let chunker = char_chunker(10).header(">> ").build().unwrap();
        let chunks = chunker.chunk("AAAA\n\nBBBB").unwrap();
        assert_eq!(texts(&chunks), [">> AAAA", ">> BBBB"]);
        assert!(chunks.iter().all(|c| c.token_count == 7));
    }

    #[test]
    fn test_header_too_large() {
        let chunker = char_chunker(4).build().unwrap();
        let err = chunker
            .chunk_document(Document::new("x").with_header("HEAD"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::HeaderTooLarge {
                header_tokens: 4,
                max_tokens: 4
            }
        ));
    }

    #[test]
    fn test_header_too_large_checked_before_content() {
        // Empty content would otherwise short-circuit to no chunks.
        let chunker = char_chunker(3).header("long header").build().unwrap();
        assert!(matches!(chunker.chunk(""), Err(Error::HeaderTooLarge { .. })));
    }

    #[test]
    fn test_document_header_overrides_default() {
        let chunker = char_chunker(50).header("default: ").build().unwrap();
        let chunks = chunker
            .chunk_document(Document::new("body").with_header("custom: "))
            .unwrap();
        assert_eq!(texts(&chunks), ["custom: body"]);
    }

    #[test]
    fn test_unsplittable_with_empty_catalog() {
        let chunker = char_chunker(5)
            .separators(SeparatorCatalog::new(Vec::new()))
            .build()
            .unwrap();
        let err = chunker.chunk("abcdefghij").unwrap_err();
        match err {
            Error::Unsplittable {
                token_count,
                max_tokens,
                preview,
            } => {
                assert_eq!(token_count, 10);
                assert_eq!(max_tokens, 5);
                assert_eq!(preview, "abcdefghij");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsplittable_aborts_whole_document() {
        let chunker = char_chunker(6)
            .separators(SeparatorCatalog::new(vec![Separator::literal("\n\n", Behavior::Remove)]))
            .min_chunk_percent(0)
            .build()
            .unwrap();
        // First paragraph fits, second cannot be split.
        assert!(matches!(
            chunker.chunk("ok\n\nwaytoolongparagraph"),
            Err(Error::Unsplittable { .. })
        ));
    }

    #[test]
    fn test_falls_back_to_next_separator() {
        let chunker = char_chunker(12).min_chunk_percent(0).build().unwrap();
        let chunks = chunker.chunk("alpha beta gamma delta").unwrap();
        assert_eq!(texts(&chunks), ["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_match_at_start_is_skipped() {
        let chunker = char_chunker(5)
            .separators(SeparatorCatalog::new(vec![
                Separator::literal("#", Behavior::Prefix),
                Separator::literal(" ", Behavior::Remove),
            ]))
            .min_chunk_percent(0)
            .build()
            .unwrap();
        // The only '#' is at offset 0, so the space wins.
        let chunks = chunker.chunk("#abc defg").unwrap();
        assert_eq!(texts(&chunks), ["#abc", "defg"]);
    }

    #[test]
    fn test_below_threshold_split_rejected() {
        let catalog = SeparatorCatalog::new(vec![
            Separator::literal("\n\n", Behavior::Remove),
            Separator::literal(" ", Behavior::Remove),
        ]);
        // Budget 10, threshold 30%: the paragraph split leaves "ab" (20%).
        let chunker = char_chunker(10)
            .separators(catalog)
            .min_chunk_percent(30)
            .build()
            .unwrap();
        let chunks = chunker.chunk("ab\n\ncdef ghijk").unwrap();
        assert_eq!(texts(&chunks), ["ab\n\ncdef", "ghijk"]);
    }

    #[test]
    fn test_threshold_exact_boundary_accepted() {
        let chunker = char_chunker(10)
            .separators(SeparatorCatalog::new(vec![Separator::literal("|", Behavior::Remove)]))
            .min_chunk_percent(30)
            .build()
            .unwrap();
        // "abc" is exactly 30% of 10.
        let chunks = chunker.chunk("abc|defghij").unwrap();
        assert_eq!(texts(&chunks), ["abc", "defghij"]);
    }

    #[test]
    fn test_split_that_does_not_shrink_is_rejected() {
        // The suffix cut after the final "x" keeps the whole text on the left.
        let chunker = char_chunker(4)
            .separators(SeparatorCatalog::new(vec![
                Separator::literal("x", Behavior::Suffix),
                Separator::literal(" ", Behavior::Remove),
            ]))
            .min_chunk_percent(0)
            .build()
            .unwrap();
        let chunks = chunker.chunk("ab cx").unwrap();
        assert_eq!(texts(&chunks), ["ab", "cx"]);
    }

    #[test]
    fn test_trailing_removed_match_never_yields_header_only_chunk() {
        let chunker = char_chunker(8)
            .separators(SeparatorCatalog::new(vec![
                Separator::literal("!", Behavior::Remove),
                Separator::literal(" ", Behavior::Remove),
            ]))
            .min_chunk_percent(0)
            .header("H: ")
            .build()
            .unwrap();
        let chunks = chunker.chunk("ab cd!").unwrap();
        assert_eq!(texts(&chunks), ["H: ab", "H: cd!"]);
        assert!(chunks.iter().all(|c| c.content != "H: "));
    }

    #[test]
    fn test_suffix_and_prefix_behaviors() {
        let chunker = char_chunker(10)
            .separators(SeparatorCatalog::new(vec![
                Separator::regex(r"[.!?]\s+", Behavior::Suffix).unwrap(),
            ]))
            .min_chunk_percent(0)
            .build()
            .unwrap();
        let chunks = chunker.chunk("One two. Three.").unwrap();
        assert_eq!(texts(&chunks), ["One two.", "Three."]);

        let chunker = char_chunker(10)
            .separators(SeparatorCatalog::new(vec![
                Separator::regex(r"\n#", Behavior::Prefix).unwrap(),
            ]))
            .min_chunk_percent(0)
            .build()
            .unwrap();
        let chunks = chunker.chunk("# One\n# Two").unwrap();
        assert_eq!(texts(&chunks), ["# One", "# Two"]);
    }

    #[test]
    fn test_recursion_preserves_order() {
        let chunker = char_chunker(6).min_chunk_percent(0).build().unwrap();
        let chunks = chunker.chunk("one\n\ntwo\n\nthree\n\nfour\n\nfive").unwrap();
        assert_eq!(texts(&chunks), ["one", "two", "three", "four", "five"]);
        let indices: Vec<_> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_crlf_normalized() {
        let chunker = char_chunker(8).build().unwrap();
        let chunks = chunker.chunk("AAAA\r\n\r\nBBBB").unwrap();
        assert_eq!(texts(&chunks), ["AAAA", "BBBB"]);
    }

    #[test]
    fn test_metadata_shared_by_children() {
        let mut meta = Metadata::new();
        meta.insert("id".into(), "42".into());
        let meta = Arc::new(meta);

        let chunker = char_chunker(6).min_chunk_percent(0).build().unwrap();
        let chunks = chunker
            .chunk_document(Document::new("one\n\ntwo\n\nthree").with_metadata(Arc::clone(&meta)))
            .unwrap();
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(Arc::ptr_eq(chunk.metadata.as_ref().unwrap(), &meta));
            assert_eq!(chunk.meta("id"), Some("42"));
        }
    }

    #[test]
    fn test_strip_html_counts_and_emits_plain_text() {
        let chunker = char_chunker(12)
            .separators(SeparatorCatalog::html())
            .strip_html(true)
            .min_chunk_percent(0)
            .build()
            .unwrap();
        let html = "<p>First part</p><p>Second bit</p>";
        // Stripped whole is 20 chars, over budget; split after the first </p>.
        let chunks = chunker.chunk(html).unwrap();
        assert_eq!(texts(&chunks), ["First part", "Second bit"]);
        assert_eq!(chunks[0].token_count, 10);
    }

    #[test]
    fn test_strip_html_fits_without_split() {
        let chunker = char_chunker(12).strip_html(true).build().unwrap();
        // 36 chars tagged, 11 stripped.
        let chunks = chunker.chunk("<div><b>Hello</b> <i>world</i></div>").unwrap();
        assert_eq!(texts(&chunks), ["Hello world"]);
        assert_eq!(chunks[0].token_count, 11);
    }

    #[test]
    fn test_count_tokens_includes_header() {
        let chunker = char_chunker(100).build().unwrap();
        assert_eq!(chunker.count_tokens("ab", "cde"), 5);
        assert_eq!(chunker.count_tokens("", "cde"), 3);
    }

    #[test]
    fn test_build_validation() {
        assert!(matches!(Chunker::builder(0).build(), Err(Error::InvalidBudget(0))));
        assert!(matches!(
            Chunker::builder(10).min_chunk_percent(150).build(),
            Err(Error::Budget(_))
        ));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_line_endings("a\r\n\r\nb\r"), "a\n\nb\n");
    }

    #[test]
    fn test_debug_output() {
        let chunker = char_chunker(10).build().unwrap();
        let debug = format!("{chunker:?}");
        assert!(debug.contains("chars"));
        assert!(debug.contains("strip_html: false"));
    }
}
