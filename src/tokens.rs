//! Token counting.
//!
//! The chunker never tokenizes anything itself. It asks a [`TokenCounter`]
//! how many tokens a piece of text costs for the target model and compares
//! that with the budget. Counters must be deterministic; they should also be
//! roughly monotonic (a substring never costs more than its superstring), or
//! the split halves cannot be compared with the chunk they came from.
//!
//! | Counter | Unit | Needs |
//! |---------|------|-------|
//! | [`CharCounter`] | Unicode scalar values | nothing |
//! | [`WordCounter`] | UAX #29 words and punctuation | nothing |
//! | `TiktokenCounter` | BPE tokens | `tiktoken` feature |

use unicode_segmentation::UnicodeSegmentation;

/// Maps text to a token count for one model vocabulary.
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;

    /// Identifier of the vocabulary this counter models.
    fn name(&self) -> &str;
}

/// Counts Unicode scalar values.
///
/// Exact and cheap; mainly useful for tests and for models with
/// character-level limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCounter;

impl TokenCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn name(&self) -> &str {
        "chars"
    }
}

/// Counts words and punctuation marks using Unicode segmentation (UAX #29).
///
/// A tokenizer-free approximation: BPE vocabularies spend roughly one token
/// per common word and one per punctuation mark.
///
/// ```rust
/// use midsplit::{TokenCounter, WordCounter};
///
/// assert_eq!(WordCounter.count("Hello, world!"), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .count()
    }

    fn name(&self) -> &str {
        "words"
    }
}

#[cfg(feature = "tiktoken")]
pub use self::bpe::{TiktokenCounter, Vocabulary};

#[cfg(feature = "tiktoken")]
mod bpe {
    use tiktoken_rs::CoreBPE;

    use super::TokenCounter;
    use crate::{Error, Result};

    /// OpenAI BPE vocabularies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Vocabulary {
        /// `cl100k_base` (GPT-3.5/4, text-embedding-3).
        Cl100kBase,
        /// `o200k_base` (GPT-4o).
        O200kBase,
        /// `p50k_base` (Codex, text-davinci-002/003).
        P50kBase,
        /// `r50k_base` (GPT-3).
        R50kBase,
    }

    impl Vocabulary {
        /// The canonical vocabulary name.
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Cl100kBase => "cl100k_base",
                Self::O200kBase => "o200k_base",
                Self::P50kBase => "p50k_base",
                Self::R50kBase => "r50k_base",
            }
        }
    }

    /// Counts BPE tokens with `tiktoken-rs`.
    pub struct TiktokenCounter {
        vocabulary: Vocabulary,
        bpe: CoreBPE,
    }

    impl TiktokenCounter {
        /// Load the given vocabulary.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Tokenizer`] if the vocabulary fails to load.
        pub fn new(vocabulary: Vocabulary) -> Result<Self> {
            let bpe = match vocabulary {
                Vocabulary::Cl100kBase => tiktoken_rs::cl100k_base(),
                Vocabulary::O200kBase => tiktoken_rs::o200k_base(),
                Vocabulary::P50kBase => tiktoken_rs::p50k_base(),
                Vocabulary::R50kBase => tiktoken_rs::r50k_base(),
            }
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
            Ok(Self { vocabulary, bpe })
        }

        /// The loaded vocabulary.
        #[must_use]
        pub fn vocabulary(&self) -> Vocabulary {
            self.vocabulary
        }
    }

    impl std::fmt::Debug for TiktokenCounter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TiktokenCounter")
                .field("vocabulary", &self.vocabulary)
                .finish_non_exhaustive()
        }
    }

    impl TokenCounter for TiktokenCounter {
        fn count(&self, text: &str) -> usize {
            self.bpe.encode_ordinary(text).len()
        }

        fn name(&self) -> &str {
            self.vocabulary.as_str()
        }
    }

}
