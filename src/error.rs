//! Errors raised at the sampling API boundary.

use thiserror::Error;

/// Invalid arguments passed to a sampler.
///
/// Degenerate inputs (`count == 0`, an empty pool, all-zero weights) are not
/// errors; they produce an empty selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    /// More items were requested than the pool holds.
    #[error("cannot draw {count} items without replacement from a pool of {pool_len}")]
    CountExceedsPool { count: usize, pool_len: usize },
    /// The weight vector is not aligned with the pool.
    #[error("weights length {weights_len} does not match pool length {pool_len}")]
    WeightsLengthMismatch { weights_len: usize, pool_len: usize },
    /// A weight is NaN, infinite, or negative.
    #[error("weight at index {index} must be finite and >= 0 (got {weight})")]
    InvalidWeight { index: usize, weight: f64 },
    /// Every weight is valid but their sum is not representable.
    #[error("total weight overflows (sum is {total})")]
    TotalWeightOverflow { total: f64 },
}

pub type Result<T> = std::result::Result<T, SamplingError>;
