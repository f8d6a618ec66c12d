//! Seed resolution.
//!
//! Every draw in this crate runs on a [`ChaCha8Rng`] built from a single `u64`
//! seed. When the caller does not supply one, the seed comes from a
//! [`SeedSource`]; the resolved seed fully determines the rest of the draw, so
//! logging it is enough to replay a session.
//!
//! Notes:
//! - [`EntropySeeds`] is the default source and is not deterministic across calls.
//! - [`FixedSeeds`] replays a scripted sequence, which is what tests want.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A capability that hands out fresh seeds.
pub trait SeedSource {
    /// Produce the next seed.
    fn next_seed(&mut self) -> u64;
}

/// Seeds drawn from the thread-local, OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySeeds;

impl SeedSource for EntropySeeds {
    fn next_seed(&mut self) -> u64 {
        rand::rng().random()
    }
}

/// A scripted seed sequence that cycles once exhausted.
///
/// An empty script yields `0` forever.
#[derive(Debug, Clone)]
pub struct FixedSeeds {
    seeds: Vec<u64>,
    next: usize,
}

impl FixedSeeds {
    /// Cycle through `seeds` in order.
    pub fn new(seeds: impl IntoIterator<Item = u64>) -> Self {
        Self {
            seeds: seeds.into_iter().collect(),
            next: 0,
        }
    }

    /// Always hand out the same seed.
    pub fn constant(seed: u64) -> Self {
        Self::new([seed])
    }
}

impl SeedSource for FixedSeeds {
    fn next_seed(&mut self) -> u64 {
        if self.seeds.is_empty() {
            return 0;
        }
        let seed = self.seeds[self.next];
        self.next = (self.next + 1) % self.seeds.len();
        seed
    }
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    fn next_seed(&mut self) -> u64 {
        (**self).next_seed()
    }
}

/// Use `seed` if given, otherwise ask `source` for one.
#[inline]
pub fn resolve_seed<S: SeedSource + ?Sized>(seed: Option<u64>, source: &mut S) -> u64 {
    match seed {
        Some(s) => s,
        None => source.next_seed(),
    }
}

/// The generator every sampler runs on.
#[inline]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
