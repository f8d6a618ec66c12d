//! Weighted sampling without replacement.
//!
//! Items are sorted by ascending weight and laid end to end on a number line,
//! each occupying a region as wide as its weight. A uniform point in
//! `[0, remaining mass)` selects the region it falls in (see
//! [`binary_search_region`]); the chosen item is then removed and every later
//! region shifted down by its weight, so the next draw sees only the mass that
//! is left.
//!
//! Notes:
//! - Zero-weight items sort to the front and are kept out of the search window,
//!   so they are never picked while positive mass remains. If a request asks for
//!   more items than carry positive weight, the rest are drawn uniformly from the
//!   zero-weight leftovers.
//! - Repeated subtraction drifts; offsets are rebuilt from the remaining weights
//!   every [`OFFSET_REBUILD_INTERVAL`] draws.

use rand::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, SamplingError};
use crate::region::binary_search_region;
use crate::seed::{resolve_seed, seeded_rng, EntropySeeds, SeedSource};

/// Number of draws between full rebuilds of the region offsets.
pub const OFFSET_REBUILD_INTERVAL: usize = 16;

/// Choose `count` elements of `pool` without replacement, with probability
/// proportional to the aligned entry of `weights`.
///
/// Returns an empty selection when `count == 0`, the pool is empty, or every
/// weight is zero. With `seed = None` a fresh seed is drawn from system entropy.
///
/// # Errors
///
/// - [`SamplingError::WeightsLengthMismatch`] if `weights.len() != pool.len()`.
/// - [`SamplingError::InvalidWeight`] for a NaN, infinite, or negative weight.
/// - [`SamplingError::TotalWeightOverflow`] if the weights sum past `f64::MAX`.
/// - [`SamplingError::CountExceedsPool`] if `count > pool.len()`.
pub fn weighted_random_choice<T: Clone>(
    pool: &[T],
    weights: &[f64],
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<T>> {
    weighted_random_choice_with_seeds(pool, weights, count, seed, &mut EntropySeeds)
}

/// [`weighted_random_choice`] with a caller-supplied seed source for the `None` case.
pub fn weighted_random_choice_with_seeds<T: Clone, S: SeedSource + ?Sized>(
    pool: &[T],
    weights: &[f64],
    count: usize,
    seed: Option<u64>,
    seeds: &mut S,
) -> Result<Vec<T>> {
    if pool.len() != weights.len() {
        return Err(SamplingError::WeightsLengthMismatch {
            weights_len: weights.len(),
            pool_len: pool.len(),
        });
    }
    if !has_mass_to_draw(weights, count)? {
        return Ok(Vec::new());
    }

    let mut rng = seeded_rng(resolve_seed(seed, seeds));
    weighted_random_choice_with_rng(pool, weights, count, &mut rng)
}

/// [`weighted_random_choice`] driven by a caller-supplied RNG (for tests/benchmarks).
pub fn weighted_random_choice_with_rng<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    if pool.len() != weights.len() {
        return Err(SamplingError::WeightsLengthMismatch {
            weights_len: weights.len(),
            pool_len: pool.len(),
        });
    }
    Ok(weighted_indices_with_rng(weights, count, rng)?
        .into_iter()
        .map(|i| pool[i].clone())
        .collect())
}

/// Draw `count` distinct indices of `weights`, weighted, in draw order.
pub fn weighted_indices_with_rng<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if !has_mass_to_draw(weights, count)? {
        return Ok(Vec::new());
    }

    // (weight, original index), ascending by weight.
    let mut entries: Vec<(f64, usize)> = weights
        .iter()
        .copied()
        .enumerate()
        .map(|(i, w)| (w, i))
        .collect();
    entries.sort_by(|(w_a, i_a), (w_b, i_b)| w_a.total_cmp(w_b).then_with(|| i_a.cmp(i_b)));

    let mut zero_weight = entries.iter().take_while(|(w, _)| *w == 0.0).count();
    let mut offsets = region_offsets(&entries);
    debug!(
        candidates = entries.len(),
        zero_weight,
        total_mass = remaining_mass(&offsets, &entries),
        count,
        "weighted draw"
    );

    let mut picked = Vec::with_capacity(count);
    let mut exhausted = false;
    for drawn in 0..count {
        if drawn > 0 && drawn % OFFSET_REBUILD_INTERVAL == 0 {
            offsets = region_offsets(&entries);
        }

        let slot = if zero_weight < entries.len() {
            let point = rng.random::<f64>() * remaining_mass(&offsets, &entries);
            binary_search_region(&offsets, point, zero_weight, entries.len())
        } else {
            if !exhausted {
                warn!(
                    drawn,
                    count,
                    remaining = entries.len(),
                    "positive weight exhausted; drawing zero-weight items uniformly"
                );
                exhausted = true;
            }
            rng.random_range(0..entries.len())
        };

        let (weight, index) = entries.remove(slot);
        offsets.remove(slot);
        for offset in &mut offsets[slot..] {
            *offset -= weight;
        }
        if weight == 0.0 {
            zero_weight -= 1;
        }
        picked.push(index);
    }

    Ok(picked)
}

/// Start of each entry's region: `offsets[i] = sum(weights[..i])`.
fn region_offsets(entries: &[(f64, usize)]) -> Vec<f64> {
    let mut sum = 0.0;
    entries
        .iter()
        .map(|&(w, _)| {
            let start = sum;
            sum += w;
            start
        })
        .collect()
}

/// Width of the whole number line: the last region's start plus its weight.
fn remaining_mass(offsets: &[f64], entries: &[(f64, usize)]) -> f64 {
    match (offsets.last(), entries.last()) {
        (Some(&start), Some(&(w, _))) => start + w,
        _ => 0.0,
    }
}

/// Validate `weights` against `count`; `Ok(false)` means the draw is empty.
fn has_mass_to_draw(weights: &[f64], count: usize) -> Result<bool> {
    if count == 0 || weights.is_empty() {
        return Ok(false);
    }
    if let Some((index, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(SamplingError::InvalidWeight { index, weight });
    }
    if !weights.iter().any(|&w| w > 0.0) {
        return Ok(false);
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(SamplingError::TotalWeightOverflow { total });
    }
    if count > weights.len() {
        return Err(SamplingError::CountExceedsPool {
            count,
            pool_len: weights.len(),
        });
    }
    Ok(true)
}
