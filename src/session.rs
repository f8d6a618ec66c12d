//! Session planning from recording history.
//!
//! A session asks the signer for a handful of words. Words that already have
//! plenty of recordings should come up less often, so each word is weighted by
//! how far it is from the per-word target and the session is drawn with
//! [`weighted_random_choice`]. Words at or past the target carry no weight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::seed::{EntropySeeds, SeedSource};
use crate::uniform::random_choice;
use crate::weighted::weighted_random_choice;

/// Preference key prefix for per-word recording counts.
pub const RECORDING_COUNT_PREFIX: &str = "RECORDING_COUNT_";
/// Preference key for the running clip index.
pub const RECORDING_INDEX_KEY: &str = "RECORDING_INDEX";

/// Knobs for session planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Words prompted per session.
    pub words_per_session: usize,
    /// Recordings wanted per word; words at this count stop being weighted.
    pub target_recordings: u32,
    /// Draw uniformly when every word has reached the target, instead of
    /// planning an empty session.
    pub zero_weight_fallback: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            words_per_session: 5,
            target_recordings: 10,
            zero_weight_fallback: true,
        }
    }
}

/// A clip id handed out by [`RecordingHistory::record_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipAssignment {
    pub word: String,
    pub id: u64,
}

/// How many times each word has been recorded, plus the running clip index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingHistory {
    counts: BTreeMap<String, u32>,
    recording_index: u64,
}

impl RecordingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recordings made so far for `word`.
    pub fn count(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Id of the most recently exported clip (0 before the first).
    pub fn recording_index(&self) -> u64 {
        self.recording_index
    }

    /// Weight per catalog entry: remaining recordings until `target`.
    pub fn weights_for<W: AsRef<str>>(&self, catalog: &[W], target: u32) -> Vec<f64> {
        catalog
            .iter()
            .map(|w| f64::from(target.saturating_sub(self.count(w.as_ref()))))
            .collect()
    }

    /// Record a finished session: `clips` pairs each word with the number of
    /// clips kept for it. Returns the clip ids, assigned consecutively after the
    /// current index in `clips` order.
    pub fn record_session<W: AsRef<str>>(&mut self, clips: &[(W, usize)]) -> Vec<ClipAssignment> {
        let mut assigned = Vec::new();
        for (word, kept) in clips {
            if *kept == 0 {
                continue;
            }
            let word = word.as_ref();
            for _ in 0..*kept {
                self.recording_index += 1;
                assigned.push(ClipAssignment {
                    word: word.to_owned(),
                    id: self.recording_index,
                });
            }
            let count = self.counts.entry(word.to_owned()).or_insert(0);
            *count = count.saturating_add(u32::try_from(*kept).unwrap_or(u32::MAX));
        }
        debug!(
            clips = assigned.len(),
            recording_index = self.recording_index,
            "recorded session"
        );
        assigned
    }

    /// Rebuild from flat preference entries (`RECORDING_COUNT_<word>`,
    /// `RECORDING_INDEX`). Unknown keys are ignored.
    pub fn from_preference_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut history = Self::default();
        for (key, value) in entries {
            let key = key.as_ref();
            if key == RECORDING_INDEX_KEY {
                history.recording_index = value;
            } else if let Some(word) = key.strip_prefix(RECORDING_COUNT_PREFIX) {
                let count = u32::try_from(value).unwrap_or(u32::MAX);
                history.counts.insert(word.to_owned(), count);
            }
        }
        history
    }

    /// Flatten into preference entries, index first, then words in order.
    pub fn preference_entries(&self) -> Vec<(String, u64)> {
        std::iter::once((RECORDING_INDEX_KEY.to_owned(), self.recording_index))
            .chain(
                self.counts
                    .iter()
                    .map(|(word, &n)| (format!("{RECORDING_COUNT_PREFIX}{word}"), u64::from(n))),
            )
            .collect()
    }
}

/// Picks the words for each recording session.
#[derive(Debug, Clone)]
pub struct SessionPlanner<S: SeedSource = EntropySeeds> {
    config: SessionConfig,
    seeds: S,
}

impl SessionPlanner<EntropySeeds> {
    /// Planner seeded from system entropy.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_seeds(config, EntropySeeds)
    }
}

impl<S: SeedSource> SessionPlanner<S> {
    pub fn with_seeds(config: SessionConfig, seeds: S) -> Self {
        Self { config, seeds }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Draw the next session, favouring words furthest from the target.
    pub fn plan<W: AsRef<str> + Clone>(
        &mut self,
        catalog: &[W],
        history: &RecordingHistory,
    ) -> Result<Vec<W>> {
        let size = self.session_size(catalog.len());
        let weights = history.weights_for(catalog, self.config.target_recordings);
        let seed = self.seeds.next_seed();
        debug!(seed, size, catalog = catalog.len(), "planning weighted session");

        let words = weighted_random_choice(catalog, &weights, size, Some(seed))?;
        if words.is_empty() && size > 0 && self.config.zero_weight_fallback {
            debug!(seed, "every word reached target; planning uniformly");
            return random_choice(catalog, size, Some(seed));
        }
        Ok(words)
    }

    /// Draw the next session uniformly, ignoring history.
    pub fn plan_uniform<W: Clone>(&mut self, catalog: &[W]) -> Result<Vec<W>> {
        let size = self.session_size(catalog.len());
        let seed = self.seeds.next_seed();
        debug!(seed, size, catalog = catalog.len(), "planning uniform session");
        random_choice(catalog, size, Some(seed))
    }

    fn session_size(&self, catalog_len: usize) -> usize {
        if catalog_len < self.config.words_per_session {
            warn!(
                catalog = catalog_len,
                words_per_session = self.config.words_per_session,
                "catalog smaller than a session; prompting every word"
            );
            return catalog_len;
        }
        self.config.words_per_session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::FixedSeeds;
    use std::collections::HashSet;

    const CATALOG: [&str; 8] = ["apple", "bird", "cat", "dog", "eat", "father", "go", "happy"];

    fn planner(seed: u64) -> SessionPlanner<FixedSeeds> {
        SessionPlanner::with_seeds(SessionConfig::default(), FixedSeeds::constant(seed))
    }

    #[test]
    fn weights_track_distance_to_target() {
        let history = RecordingHistory::from_preference_entries([
            ("RECORDING_COUNT_apple", 3u64),
            ("RECORDING_COUNT_bird", 12),
        ]);
        assert_eq!(
            history.weights_for(&["apple", "bird", "cat"], 10),
            vec![7.0, 0.0, 10.0]
        );
    }

    #[test]
    fn plan_is_reproducible_for_a_seed() {
        let history = RecordingHistory::new();
        let a = planner(77).plan(&CATALOG, &history).unwrap();
        let b = planner(77).plan(&CATALOG, &history).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert_eq!(a.iter().collect::<HashSet<_>>().len(), 5);
    }

    #[test]
    fn words_at_target_wait_for_the_rest() {
        let mut counts: Vec<(String, u64)> = CATALOG[..3]
            .iter()
            .map(|w| (format!("{RECORDING_COUNT_PREFIX}{w}"), 10))
            .collect();
        counts.push((format!("{RECORDING_COUNT_PREFIX}dog"), 4));
        let history = RecordingHistory::from_preference_entries(counts);

        for seed in 0..100 {
            let words = planner(seed).plan(&CATALOG, &history).unwrap();
            assert_eq!(words.len(), 5);
            for done in &CATALOG[..3] {
                assert!(!words.contains(done), "seed {seed}: {words:?}");
            }
        }
    }

    #[test]
    fn finished_catalog_falls_back_to_uniform() {
        let history = RecordingHistory::from_preference_entries(
            CATALOG
                .iter()
                .map(|w| (format!("{RECORDING_COUNT_PREFIX}{w}"), 10u64)),
        );
        let words = planner(5).plan(&CATALOG, &history).unwrap();
        assert_eq!(words.len(), 5);

        let config = SessionConfig {
            zero_weight_fallback: false,
            ..SessionConfig::default()
        };
        let mut strict = SessionPlanner::with_seeds(config, FixedSeeds::constant(5));
        assert!(strict.plan(&CATALOG, &history).unwrap().is_empty());
    }

    #[test]
    fn small_catalog_prompts_every_word() {
        let catalog = ["yes", "no"];
        let mut words = planner(1).plan(&catalog, &RecordingHistory::new()).unwrap();
        words.sort_unstable();
        assert_eq!(words, vec!["no", "yes"]);

        let empty: [&str; 0] = [];
        assert!(planner(1).plan_uniform(&empty).unwrap().is_empty());
    }

    #[test]
    fn uniform_plan_ignores_history() {
        let words = planner(3).plan_uniform(&CATALOG).unwrap();
        assert_eq!(words.len(), 5);
        assert_eq!(words, random_choice(&CATALOG, 5, Some(3)).unwrap());
    }

    #[test]
    fn record_session_assigns_consecutive_ids() {
        let mut history = RecordingHistory::from_preference_entries([(RECORDING_INDEX_KEY, 41u64)]);
        let clips = history.record_session(&[("apple", 2), ("cat", 1), ("dog", 0)]);
        let ids: Vec<(&str, u64)> = clips.iter().map(|c| (c.word.as_str(), c.id)).collect();
        assert_eq!(ids, vec![("apple", 42), ("apple", 43), ("cat", 44)]);
        assert_eq!(history.count("apple"), 2);
        assert_eq!(history.count("cat"), 1);
        assert_eq!(history.count("dog"), 0);
        assert_eq!(history.recording_index(), 44);
        assert!(!history
            .preference_entries()
            .iter()
            .any(|(key, _)| key == "RECORDING_COUNT_dog"));
    }

    #[test]
    fn preference_entries_round_trip() {
        let mut history = RecordingHistory::new();
        history.record_session(&[("bird", 3), ("apple", 1)]);
        let entries = history.preference_entries();
        assert_eq!(
            entries,
            vec![
                (RECORDING_INDEX_KEY.to_owned(), 4),
                ("RECORDING_COUNT_apple".to_owned(), 1),
                ("RECORDING_COUNT_bird".to_owned(), 3),
            ]
        );
        assert_eq!(RecordingHistory::from_preference_entries(entries), history);
    }

    #[test]
    fn unknown_preference_keys_are_ignored() {
        let history =
            RecordingHistory::from_preference_entries([("THEME", 1u64), ("RECORDING_COUNT_go", 2)]);
        assert_eq!(history.count("go"), 2);
        assert_eq!(history.preference_entries().len(), 2);
    }

    #[test]
    fn history_persists_as_json() {
        let mut history = RecordingHistory::new();
        history.record_session(&[("happy", 2)]);
        let json = serde_json::to_string(&history).unwrap();
        let back: RecordingHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"words_per_session": 8}"#).unwrap();
        assert_eq!(config.words_per_session, 8);
        assert_eq!(config.target_recordings, 10);
        assert!(config.zero_weight_fallback);
    }
}
