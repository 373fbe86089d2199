//! Error types for midsplit.

use crate::budget::BudgetError;

/// Errors that can occur during chunking.
///
/// Every variant is fatal: chunking is deterministic, so retrying with the
/// same input and configuration produces the same error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chunk header alone uses the whole token budget.
    #[error("header uses {header_tokens} tokens, budget is {max_tokens}")]
    HeaderTooLarge {
        /// Tokens counted for the header.
        header_tokens: usize,
        /// The configured token budget.
        max_tokens: usize,
    },

    /// A chunk exceeds the budget and no separator could split it.
    #[error("chunk of {token_count} tokens exceeds budget {max_tokens} and cannot be split: {preview:?}")]
    Unsplittable {
        /// Tokens counted for the chunk (header included).
        token_count: usize,
        /// The configured token budget.
        max_tokens: usize,
        /// The first few characters of the offending chunk.
        preview: String,
    },

    /// Invalid token budget (must be > 0).
    #[error("invalid token budget: {0} (must be > 0)")]
    InvalidBudget(usize),

    /// Budget configuration rejected.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// A separator pattern failed to compile.
    #[error("invalid separator pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Tokenizer backend error.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

/// Result type for midsplit operations.
pub type Result<T> = std::result::Result<T, Error>;
