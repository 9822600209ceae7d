use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::model::{Level, LevelParseError, WordCatalog};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelProgressError {
    #[error("known count ({known}) exceeds total ({total})")]
    KnownExceedsTotal { known: usize, total: usize },

    #[error(transparent)]
    UnknownLevel(#[from] LevelParseError),
}

//
// ─── LEVEL PROGRESS ────────────────────────────────────────────────────────────
//

/// Known/total word counts for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawLevelProgress")]
pub struct LevelProgress {
    total: usize,
    known: usize,
}

#[derive(Deserialize)]
struct RawLevelProgress {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    known: usize,
}

impl TryFrom<RawLevelProgress> for LevelProgress {
    type Error = LevelProgressError;

    fn try_from(raw: RawLevelProgress) -> Result<Self, Self::Error> {
        LevelProgress::new(raw.total, raw.known)
    }
}

impl LevelProgress {
    /// # Errors
    ///
    /// Returns `LevelProgressError::KnownExceedsTotal` if `known > total`.
    pub fn new(total: usize, known: usize) -> Result<Self, LevelProgressError> {
        if known > total {
            return Err(LevelProgressError::KnownExceedsTotal { known, total });
        }
        Ok(Self { total, known })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn known(&self) -> usize {
        self.known
    }

    /// True when every word of a non-empty level is known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.known == self.total
    }

    /// Rounded completion percentage; `0` for an empty level.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rounded = (self.known * 200 + self.total) / (2 * self.total);
        u8::try_from(rounded).unwrap_or(100)
    }
}

/// Progress for every level, always holding all six entries.
///
/// Persisted as a JSON object keyed by level name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, LevelProgress>",
    into = "BTreeMap<String, LevelProgress>"
)]
pub struct LevelProgressMap {
    entries: [LevelProgress; Level::COUNT],
}

impl LevelProgressMap {
    #[must_use]
    pub fn get(&self, level: Level) -> LevelProgress {
        self.entries[level.index()]
    }

    pub fn set(&mut self, level: Level, progress: LevelProgress) {
        self.entries[level.index()] = progress;
    }

    /// Entries in level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, LevelProgress)> + '_ {
        Level::ALL.into_iter().map(|level| (level, self.get(level)))
    }
}

impl TryFrom<BTreeMap<String, LevelProgress>> for LevelProgressMap {
    type Error = LevelProgressError;

    fn try_from(raw: BTreeMap<String, LevelProgress>) -> Result<Self, Self::Error> {
        let mut map = Self::default();
        for (name, progress) in raw {
            let level: Level = name.parse()?;
            map.set(level, progress);
        }
        Ok(map)
    }
}

impl From<LevelProgressMap> for BTreeMap<String, LevelProgress> {
    fn from(map: LevelProgressMap) -> Self {
        map.iter()
            .map(|(level, progress)| (level.as_str().to_owned(), progress))
            .collect()
    }
}

/// Count total and known words at one level.
#[must_use]
pub fn compute_level(
    catalog: &WordCatalog,
    known: &BTreeSet<String>,
    level: Level,
) -> LevelProgress {
    let mut total = 0;
    let mut known_count = 0;
    for word in catalog.at_level(level) {
        total += 1;
        if known.contains(word.key()) {
            known_count += 1;
        }
    }
    LevelProgress {
        total,
        known: known_count,
    }
}

/// Derive the full per-level cache from the catalog and the known set.
#[must_use]
pub fn compute_level_progress(
    catalog: &WordCatalog,
    known: &BTreeSet<String>,
) -> LevelProgressMap {
    let mut map = LevelProgressMap::default();
    for level in Level::ALL {
        map.set(level, compute_level(catalog, known, level));
    }
    map
}

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// Durable learner state, serialized as a single blob.
///
/// `reviewWords` was previously stored as `newWords`. Both keys load, and a
/// blob carrying both gets their union.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProgressState")]
pub struct ProgressState {
    current_learn_level: Level,
    known_words: BTreeSet<String>,
    review_words: BTreeSet<String>,
    level_progress: LevelProgressMap,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgressState {
    #[serde(default)]
    current_learn_level: Level,
    #[serde(default)]
    known_words: BTreeSet<String>,
    #[serde(default)]
    review_words: BTreeSet<String>,
    #[serde(default)]
    new_words: BTreeSet<String>,
    #[serde(default)]
    level_progress: LevelProgressMap,
}

impl From<RawProgressState> for ProgressState {
    fn from(raw: RawProgressState) -> Self {
        let mut review_words = raw.review_words;
        review_words.extend(raw.new_words);
        Self {
            current_learn_level: raw.current_learn_level,
            known_words: raw.known_words,
            review_words,
            level_progress: raw.level_progress,
        }
    }
}

/// Read-only snapshot for stats display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStats {
    pub total_known: usize,
    pub total_review: usize,
    pub current_level: Level,
    pub level_progress: LevelProgressMap,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_learn_level(&self) -> Level {
        self.current_learn_level
    }

    #[must_use]
    pub fn known_words(&self) -> &BTreeSet<String> {
        &self.known_words
    }

    #[must_use]
    pub fn review_words(&self) -> &BTreeSet<String> {
        &self.review_words
    }

    #[must_use]
    pub fn level_progress(&self) -> &LevelProgressMap {
        &self.level_progress
    }

    #[must_use]
    pub fn is_known(&self, word: &str) -> bool {
        self.known_words.contains(word)
    }

    #[must_use]
    pub fn is_flagged_for_review(&self, word: &str) -> bool {
        self.review_words.contains(word)
    }

    /// Mark `word` mastered and clear any review flag on it.
    ///
    /// Returns `true` if the state changed.
    pub fn mark_known(&mut self, word: &str) -> bool {
        let added = self.known_words.insert(word.to_owned());
        let unflagged = self.review_words.remove(word);
        added || unflagged
    }

    /// Flag `word` for review. Known status is left alone.
    ///
    /// Returns `true` if the flag was newly set.
    pub fn mark_for_review(&mut self, word: &str) -> bool {
        self.review_words.insert(word.to_owned())
    }

    /// Overwrite the whole level cache from the catalog.
    pub fn recompute_level_progress(&mut self, catalog: &WordCatalog) {
        self.level_progress = compute_level_progress(catalog, &self.known_words);
    }

    /// Refresh the cache entry for a single level.
    pub fn recompute_level(&mut self, catalog: &WordCatalog, level: Level) {
        let progress = compute_level(catalog, &self.known_words, level);
        self.level_progress.set(level, progress);
    }

    /// A level can be left once every one of its words is known.
    ///
    /// Empty levels never qualify.
    #[must_use]
    pub fn can_advance(&self, level: Level) -> bool {
        self.level_progress.get(level).is_complete()
    }

    /// Move the learn level up by one. No-op at the ceiling.
    ///
    /// Returns the new level when it moved.
    pub fn advance_level(&mut self) -> Option<Level> {
        let next = self.current_learn_level.next()?;
        self.current_learn_level = next;
        Some(next)
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            total_known: self.known_words.len(),
            total_review: self.review_words.len(),
            current_level: self.current_learn_level,
            level_progress: self.level_progress.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;
    use proptest::prelude::*;

    fn catalog(entries: &[(&str, Level)]) -> WordCatalog {
        WordCatalog::new(
            entries
                .iter()
                .map(|(key, level)| Word::new(*key, *level, "", ""))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn defaults_start_at_lowest_level() {
        let state = ProgressState::new();
        assert_eq!(state.current_learn_level(), Level::A1);
        assert!(state.known_words().is_empty());
        assert!(state.review_words().is_empty());
        for (_, progress) in state.level_progress().iter() {
            assert_eq!(progress, LevelProgress::default());
        }
    }

    #[test]
    fn mark_known_is_idempotent_and_clears_review() {
        let mut state = ProgressState::new();
        state.mark_for_review("cat");
        assert!(state.mark_known("cat"));
        let once = state.known_words().clone();
        assert!(!state.mark_known("cat"));
        assert_eq!(state.known_words(), &once);
        assert!(!state.is_flagged_for_review("cat"));
    }

    #[test]
    fn review_flag_does_not_touch_known() {
        let mut state = ProgressState::new();
        state.mark_known("cat");
        assert!(state.mark_for_review("cat"));
        assert!(!state.mark_for_review("cat"));
        assert!(state.is_known("cat"));
        assert!(state.is_flagged_for_review("cat"));
    }

    #[test]
    fn review_flagged_known_word_still_counts_as_known() {
        let catalog = catalog(&[("cat", Level::A1), ("dog", Level::A1)]);
        let mut state = ProgressState::new();
        state.mark_known("cat");
        state.mark_known("dog");
        state.mark_for_review("dog");
        state.recompute_level_progress(&catalog);
        assert_eq!(state.level_progress().get(Level::A1).known(), 2);
        assert!(state.can_advance(Level::A1));
    }

    #[test]
    fn empty_level_never_advances() {
        let state = ProgressState::new();
        for level in Level::ALL {
            assert!(!state.can_advance(level));
        }
    }

    #[test]
    fn advance_stops_at_ceiling() {
        let mut state = ProgressState::new();
        let mut visited = vec![state.current_learn_level()];
        while let Some(next) = state.advance_level() {
            visited.push(next);
        }
        assert_eq!(visited, Level::ALL);
        assert_eq!(state.advance_level(), None);
        assert_eq!(state.current_learn_level(), Level::C2);
    }

    #[test]
    fn recompute_single_level_leaves_others() {
        let catalog = catalog(&[("cat", Level::A1), ("idea", Level::B1)]);
        let mut state = ProgressState::new();
        state.mark_known("cat");
        state.mark_known("idea");
        state.recompute_level(&catalog, Level::A1);
        assert_eq!(state.level_progress().get(Level::A1), LevelProgress::new(1, 1).unwrap());
        assert_eq!(state.level_progress().get(Level::B1), LevelProgress::default());
    }

    #[test]
    fn percent_rounds_like_display() {
        assert_eq!(LevelProgress::new(3, 1).unwrap().percent(), 33);
        assert_eq!(LevelProgress::new(3, 2).unwrap().percent(), 67);
        assert_eq!(LevelProgress::new(8, 1).unwrap().percent(), 13);
        assert_eq!(LevelProgress::new(0, 0).unwrap().percent(), 0);
        assert_eq!(LevelProgress::new(4, 4).unwrap().percent(), 100);
    }

    #[test]
    fn stats_snapshot() {
        let mut state = ProgressState::new();
        state.mark_known("cat");
        state.mark_known("dog");
        state.mark_for_review("idea");
        let stats = state.stats();
        assert_eq!(stats.total_known, 2);
        assert_eq!(stats.total_review, 1);
        assert_eq!(stats.current_level, Level::A1);
    }

    #[test]
    fn blob_shape_round_trips() {
        let mut state = ProgressState::new();
        state.mark_known("cat");
        state.mark_for_review("dog");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentLearnLevel"], "A1");
        assert_eq!(json["knownWords"], serde_json::json!(["cat"]));
        assert_eq!(json["reviewWords"], serde_json::json!(["dog"]));
        assert_eq!(json["levelProgress"]["C2"]["total"], 0);

        let back: ProgressState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn loads_legacy_blob() {
        let legacy = r#"{
            "currentLearnLevel": "A2",
            "knownWords": ["cat", "dog", "cat"],
            "newWords": ["idea"],
            "levelProgress": { "A1": { "total": 2, "known": 2 } }
        }"#;
        let state: ProgressState = serde_json::from_str(legacy).unwrap();
        assert_eq!(state.current_learn_level(), Level::A2);
        assert_eq!(state.known_words().len(), 2);
        assert!(state.is_flagged_for_review("idea"));
        assert_eq!(state.level_progress().get(Level::A1).known(), 2);
        assert_eq!(state.level_progress().get(Level::B1), LevelProgress::default());

        let mixed = r#"{ "reviewWords": ["cat"], "newWords": ["idea", "cat"] }"#;
        let state: ProgressState = serde_json::from_str(mixed).unwrap();
        assert_eq!(state.review_words().len(), 2);
        assert!(state.is_flagged_for_review("cat"));
        assert!(state.is_flagged_for_review("idea"));
        let saved = serde_json::to_value(&state).unwrap();
        assert!(saved.get("newWords").is_none());
    }

    #[test]
    fn rejects_inconsistent_cache() {
        let bad = r#"{ "levelProgress": { "A1": { "total": 1, "known": 5 } } }"#;
        assert!(serde_json::from_str::<ProgressState>(bad).is_err());
        let unknown_level = r#"{ "levelProgress": { "Z1": { "total": 1, "known": 0 } } }"#;
        assert!(serde_json::from_str::<ProgressState>(unknown_level).is_err());
    }

    fn arb_catalog() -> impl Strategy<Value = (WordCatalog, BTreeSet<String>)> {
        prop::collection::vec((0usize..Level::COUNT, any::<bool>()), 0..40).prop_map(
            |entries| {
                let mut words = Vec::new();
                let mut known = BTreeSet::new();
                for (i, (level_idx, is_known)) in entries.into_iter().enumerate() {
                    let key = format!("w{i}");
                    if is_known {
                        known.insert(key.clone());
                    }
                    words.push(Word::new(key, Level::ALL[level_idx], "", ""));
                }
                (WordCatalog::new(words).unwrap(), known)
            },
        )
    }

    proptest! {
        #[test]
        fn recompute_never_exceeds_total((catalog, known) in arb_catalog()) {
            let map = compute_level_progress(&catalog, &known);
            for (level, progress) in map.iter() {
                prop_assert!(progress.known() <= progress.total());
                prop_assert_eq!(progress.total(), catalog.count_at(level));
                let all_known = catalog.at_level(level).all(|w| known.contains(w.key()));
                prop_assert_eq!(progress.known() == progress.total(), all_known);
            }
        }

        #[test]
        fn mark_known_twice_equals_once(key in "[a-z]{1,8}", flagged in any::<bool>()) {
            let mut once = ProgressState::new();
            if flagged {
                once.mark_for_review(&key);
            }
            once.mark_known(&key);
            let mut twice = once.clone();
            twice.mark_known(&key);
            prop_assert_eq!(&once, &twice);
            prop_assert!(!twice.is_flagged_for_review(&key));
        }

        #[test]
        fn advancing_never_passes_ceiling(steps in 0usize..20) {
            let mut state = ProgressState::new();
            let mut previous = state.current_learn_level();
            for _ in 0..steps {
                state.advance_level();
                prop_assert!(state.current_learn_level() >= previous);
                previous = state.current_learn_level();
            }
            prop_assert!(state.current_learn_level() <= Level::HIGHEST);
        }
    }
}
