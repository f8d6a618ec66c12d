//! `signdraw`: word selection for sign-language recording sessions.
//!
//! A session prompts a signer with a few words from a catalog. This crate
//! decides which ones: uniformly, or weighted toward words that still need
//! recordings, always without replacement and always replayable from a seed.
//!
//! Exposed modules:
//! - `uniform`: uniform sampling without replacement (rejection, then a list pool).
//! - `weighted`: weighted sampling without replacement (mass removal over region offsets).
//! - `region`: region lookup over sorted offsets.
//! - `seed`: seed sources and the seeded generator all draws run on.
//! - `session`: recording history and the session planner built on the samplers.
//! - `format`: zero padding and clip export names.

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod region;
pub mod seed;
pub mod session;
pub mod uniform;
pub mod weighted;

pub use error::{Result, SamplingError};
pub use format::{pad_zeroes, DEFAULT_PAD_DIGITS};
pub use region::binary_search_region;
pub use seed::{EntropySeeds, FixedSeeds, SeedSource};
pub use session::{RecordingHistory, SessionConfig, SessionPlanner};
pub use uniform::{random_choice, random_choice_with_rng, random_choice_with_seeds};
pub use weighted::{
    weighted_random_choice, weighted_random_choice_with_rng, weighted_random_choice_with_seeds,
};
