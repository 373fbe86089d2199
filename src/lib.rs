//! # midsplit
//!
//! Token-bounded text chunking for embedding pipelines.
//!
//! ## The Problem
//!
//! Embedding models take a fixed number of tokens. Documents don't fit. You
//! need pieces that are guaranteed to fit, cut at places that keep meaning
//! intact, and numbered so the original order can be recovered.
//!
//! Two things make this harder than it looks:
//!
//! - The limit is in *tokens*, not characters, and only the model's
//!   tokenizer knows the real count
//! - Context often rides along with every chunk (a title, a breadcrumb),
//!   and it eats into the same budget
//!
//! ## The Approach: Split at the Center, Best Boundary First
//!
//! A chunk that is over budget gets cut in two, and each half is handled the
//! same way until everything fits:
//!
//! ```text
//! Budget: 6 tokens (words and punctuation)
//!
//! "Intro text.\n\nMore body text here.\n\nClosing."          10 tokens
//!        ↓ paragraph break nearest the middle
//! "Intro text."  |  "More body text here.\n\nClosing."       3 | 7
//!    fits                 ↓
//!                   "More body text here."  |  "Closing."     5 | 2
//!                      fits                      fits
//! ```
//!
//! Separators are tried from most to least preferred (paragraph, line,
//! sentence, clause, word, character). Among the matches of one separator,
//! the one closest to the midpoint wins, which keeps the halves balanced and
//! the recursion shallow. A cut is rejected if it would leave a
//! uselessly small half, and the next separator gets a turn.
//!
//! If no separator can split an oversized chunk, chunking fails with
//! [`Error::Unsplittable`]. It never emits a chunk over budget.
//!
//! ## Quick Start
//!
//! ```rust
//! use midsplit::{Chunker, Document};
//!
//! let chunker = Chunker::builder(64).header("Guide: install\n").build()?;
//!
//! let text = "Download the archive.\n\nUnpack it somewhere on your PATH.";
//! let chunks = chunker.chunk_document(Document::new(text))?;
//!
//! assert_eq!(chunks.len(), 1);
//! assert!(chunks[0].content.starts_with("Guide: install\n"));
//! # Ok::<(), midsplit::Error>(())
//! ```
//!
//! ## Token Counters
//!
//! | Counter | Unit | Feature |
//! |---------|------|---------|
//! | [`WordCounter`] (default) | words and punctuation | - |
//! | [`CharCounter`] | characters | - |
//! | `TiktokenCounter` | OpenAI BPE tokens | `tiktoken` |
//!
//! Anything implementing [`TokenCounter`] can be plugged in.
//!
//! ## HTML
//!
//! With [`ChunkerBuilder::strip_html`], counts are taken on tag-stripped text
//! and emitted chunks are plain text. Separators still match against the
//! markup (see [`SeparatorCatalog::html`]), so block-level tags make good
//! cut points.

mod boundary;
mod budget;
mod chunk;
mod chunker;
mod error;
mod separator;
mod split;
mod strip;
mod tokens;

pub use boundary::{find_boundaries, select_boundary, Boundary};
pub use budget::{BudgetError, TokenBudget};
pub use chunk::{Document, DocumentChunk, Metadata};
pub use chunker::{normalize_line_endings, Chunker, ChunkerBuilder};
pub use error::{Error, Result};
pub use separator::{Behavior, Literal, Pattern, Separator, SeparatorCatalog};
pub use split::{split_content, split_offsets};
pub use strip::{RegexTagStripper, TagStripper};
pub use tokens::{CharCounter, TokenCounter, WordCounter};

#[cfg(feature = "html")]
pub use strip::Html2TextStripper;

#[cfg(feature = "tiktoken")]
pub use tokens::{TiktokenCounter, Vocabulary};
