//! Uniform sampling without replacement.
//!
//! Draws `count` distinct positions from a pool by rejection: pick a random
//! index, retry if it was already taken. Rejection gets expensive once most of
//! the pool is taken (picking 9 of 10 needs ~5 tries for the last pick), so
//! after the fraction of drawn items crosses [`LIST_POOL_THRESHOLD`] the
//! sampler materializes the not-yet-picked indices once and draws from that
//! list instead. Small selections never pay for the list.
//!
//! Output order is draw order, not pool order.

use std::collections::HashSet;

use rand::prelude::*;

use crate::error::{Result, SamplingError};
use crate::seed::{resolve_seed, seeded_rng, EntropySeeds, SeedSource};

/// Fraction of the pool drawn after which the sampler switches from rejection
/// to drawing from an explicit list of remaining indices.
pub const LIST_POOL_THRESHOLD: f64 = 0.8;

/// Choose `count` elements of `pool` uniformly at random, without replacement.
///
/// With `seed = None` a fresh seed is drawn from system entropy.
///
/// # Errors
///
/// [`SamplingError::CountExceedsPool`] if `count > pool.len()`.
pub fn random_choice<T: Clone>(pool: &[T], count: usize, seed: Option<u64>) -> Result<Vec<T>> {
    random_choice_with_seeds(pool, count, seed, &mut EntropySeeds)
}

/// [`random_choice`] with a caller-supplied seed source for the `None` case.
pub fn random_choice_with_seeds<T: Clone, S: SeedSource + ?Sized>(
    pool: &[T],
    count: usize,
    seed: Option<u64>,
    seeds: &mut S,
) -> Result<Vec<T>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    check_count(count, pool.len())?;

    let mut rng = seeded_rng(resolve_seed(seed, seeds));
    random_choice_with_rng(pool, count, &mut rng)
}

/// [`random_choice`] driven by a caller-supplied RNG (for tests/benchmarks).
pub fn random_choice_with_rng<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    Ok(random_indices_with_rng(pool.len(), count, rng)?
        .into_iter()
        .map(|i| pool[i].clone())
        .collect())
}

/// Draw `count` distinct indices from `0..n`, in draw order.
///
/// # Errors
///
/// [`SamplingError::CountExceedsPool`] if `count > n`.
pub fn random_indices_with_rng<R: Rng + ?Sized>(
    n: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    check_count(count, n)?;

    if count == 1 {
        return Ok(vec![rng.random_range(0..n)]);
    }

    let mut picked_set: HashSet<usize> = HashSet::with_capacity(count);
    let mut picked: Vec<usize> = Vec::with_capacity(count);
    // Built once, when the threshold is crossed.
    let mut not_yet_picked: Option<Vec<usize>> = None;

    for drawn in 1..=count {
        let index = match not_yet_picked.as_mut() {
            Some(remaining) => {
                let slot = rng.random_range(0..remaining.len());
                remaining.swap_remove(slot)
            }
            None => loop {
                let candidate = rng.random_range(0..n);
                if !picked_set.contains(&candidate) {
                    break candidate;
                }
            },
        };

        picked_set.insert(index);
        picked.push(index);

        if drawn < count
            && not_yet_picked.is_none()
            && drawn as f64 / n as f64 > LIST_POOL_THRESHOLD
        {
            not_yet_picked = Some((0..n).filter(|i| !picked_set.contains(i)).collect());
        }
    }

    Ok(picked)
}

fn check_count(count: usize, pool_len: usize) -> Result<()> {
    if count > pool_len {
        return Err(SamplingError::CountExceedsPool { count, pool_len });
    }
    Ok(())
}
