//! Error types for surfrank-core.

use crate::PageId;
use thiserror::Error;

/// Error type for corpus and ranking operations.
///
/// Boundary preconditions (`EmptyCorpus`, `DampingOutOfRange`, `ZeroSamples`,
/// `ZeroChains`, `PageNotFound`) reject bad inputs before any computation.
/// `InvalidProbability` and `InvalidProbabilitySum` are internal-consistency
/// faults: a produced distribution broke the probability invariant, which
/// signals an algorithm defect rather than bad input.
#[derive(Error, Debug)]
pub enum Error {
    /// The corpus contains no pages.
    #[error("corpus contains no pages")]
    EmptyCorpus,

    /// Damping factor outside the open interval (0, 1).
    #[error("damping factor must lie in (0, 1), got {0}")]
    DampingOutOfRange(f64),

    /// Sample count of zero.
    #[error("sample count must be at least 1")]
    ZeroSamples,

    /// Parallel sampling requested with zero chains.
    #[error("chain count must be at least 1")]
    ZeroChains,

    /// Page not present in the corpus.
    #[error("page not found in corpus: {0}")]
    PageNotFound(PageId),

    /// A probability fell outside [0, 1].
    #[error("probability {value} for page {page} is outside [0, 1]")]
    InvalidProbability {
        /// Page carrying the offending value.
        page: PageId,
        /// The out-of-bounds value.
        value: f64,
    },

    /// Distribution values do not sum to 1.
    #[error("probabilities sum to {sum}, expected 1.0")]
    InvalidProbabilitySum {
        /// The actual sum of all values.
        sum: f64,
    },

    /// Rank iteration exceeded its round cap without converging.
    #[error("rank iteration did not converge after {rounds} rounds (last delta {delta})")]
    NonConvergence {
        /// Rounds that ran before giving up.
        rounds: usize,
        /// L1 delta of the last round.
        delta: f64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for corpus and ranking operations.
pub type Result<T> = std::result::Result<T, Error>;
