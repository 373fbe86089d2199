//! Token budget configuration.
//!
//! ## The Problem
//!
//! Embedding models accept a fixed number of tokens. Anything past the limit
//! is silently truncated, so a chunk that is one token too long loses its
//! tail. The budget is therefore a hard ceiling, never a target.
//!
//! A second concern is balance. Splitting near the center of a chunk usually
//! yields two reasonable halves, but the nearest separator can sit right
//! next to an edge:
//!
//! ```text
//! Budget: 100 tokens
//! Chunk:  "Note:\n\n[150 tokens of prose]"
//!
//! Split at "\n\n": ["Note:", "[150 tokens ...]"]
//!                   ↑ 2 tokens, 2% of budget, useless as an embedding
//! ```
//!
//! ## The Solution: A Minimum Percentage
//!
//! `TokenBudget` pairs the ceiling with a minimum chunk size expressed as a
//! percentage of the ceiling. A candidate split is rejected when either half
//! falls below it, and the next separator in the catalog gets a turn.

/// Maximum tokens per chunk plus the minimum acceptable half size.
///
/// # Examples
///
/// ```rust
/// use midsplit::TokenBudget;
///
/// let budget = TokenBudget::new(200).with_min_percent(25).unwrap();
/// assert_eq!(budget.max_tokens(), 200);
/// assert!(budget.fits(200));
/// assert!(!budget.fits(201));
///
/// // 50 tokens is exactly 25% of 200: accepted.
/// assert!(budget.meets_minimum(50));
/// assert!(!budget.meets_minimum(49));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenBudget {
    max_tokens: usize,
    min_chunk_percent: u32,
}

impl TokenBudget {
    /// Minimum chunk percentage used when none is configured.
    pub const DEFAULT_MIN_PERCENT: u32 = 10;

    /// Create a budget with the default minimum chunk percentage.
    ///
    /// A zero budget is representable here but rejected by
    /// [`ChunkerBuilder::build`](crate::ChunkerBuilder::build); use
    /// [`TokenBudget::try_new`] to validate upfront.
    #[must_use]
    pub const fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            min_chunk_percent: Self::DEFAULT_MIN_PERCENT,
        }
    }

    /// Create a budget, rejecting a zero ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::ZeroBudget`] if `max_tokens == 0`.
    pub const fn try_new(max_tokens: usize) -> Result<Self, BudgetError> {
        if max_tokens == 0 {
            Err(BudgetError::ZeroBudget)
        } else {
            Ok(Self::new(max_tokens))
        }
    }

    /// The hard token ceiling for every emitted chunk.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// The minimum size of either half of a split, as a percentage of the ceiling.
    #[must_use]
    pub const fn min_chunk_percent(&self) -> u32 {
        self.min_chunk_percent
    }

    /// Set the minimum chunk percentage.
    ///
    /// # Errors
    ///
    /// Returns an error if `percent > 100`.
    pub fn with_min_percent(self, percent: u32) -> Result<Self, BudgetError> {
        if percent > 100 {
            Err(BudgetError::PercentOutOfRange(percent))
        } else {
            Ok(Self {
                min_chunk_percent: percent,
                ..self
            })
        }
    }

    /// Whether a chunk of `tokens` fits under the ceiling.
    #[must_use]
    pub const fn fits(&self, tokens: usize) -> bool {
        tokens <= self.max_tokens
    }

    /// `tokens` as a percentage of the ceiling, for diagnostics.
    #[must_use]
    pub fn percent_of(&self, tokens: usize) -> f64 {
        if self.max_tokens == 0 {
            return f64::INFINITY;
        }
        tokens as f64 * 100.0 / self.max_tokens as f64
    }

    /// Whether a split half of `tokens` is large enough to keep.
    ///
    /// Compared in integers so a half exactly at the threshold is accepted.
    #[must_use]
    pub fn meets_minimum(&self, tokens: usize) -> bool {
        let lhs = (tokens as u128) * 100;
        let rhs = u128::from(self.min_chunk_percent) * self.max_tokens as u128;
        lhs >= rhs
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        // Common context size for sentence-embedding models
        Self::new(512)
    }
}

impl From<usize> for TokenBudget {
    fn from(max_tokens: usize) -> Self {
        Self::new(max_tokens)
    }
}

/// Error when configuring a token budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    /// The ceiling must be at least one token.
    #[error("token budget must be > 0")]
    ZeroBudget,

    /// The minimum chunk percentage must lie in 0..=100.
    #[error("minimum chunk percent {0} is out of range (0..=100)")]
    PercentOutOfRange(u32),
}
