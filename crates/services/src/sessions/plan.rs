use std::fmt;

use rand::Rng;

use vocab_core::model::{Level, ProgressState, Session, SessionMode, Word, WordCatalog};

/// What the planner decided for a requested session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPlan {
    /// Words are available; present them in this order.
    Ready(Session),
    /// The current level is mastered; ask whether to move to `next`.
    AdvancePrompt { completed: Level, next: Level },
    /// The highest level is mastered.
    AllLevelsComplete,
    /// Nothing left to learn at `level`, but it cannot be advanced from.
    NothingToReview { level: Level },
    /// The catalog has no words at `level`.
    EmptyLevel { level: Level },
}

impl SessionPlan {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionPlan::Ready(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionPlan::Ready(_))
    }
}

impl fmt::Display for SessionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPlan::Ready(session) => write!(
                f,
                "Starting {} session: {} words from {}.",
                session.mode(),
                session.len(),
                session.level()
            ),
            SessionPlan::AdvancePrompt { completed, next } => write!(
                f,
                "Congratulations! You've completed {completed}!\n\nMove to {next}?"
            ),
            SessionPlan::AllLevelsComplete => f.write_str("Amazing! You've completed all levels!"),
            SessionPlan::NothingToReview { level } => {
                write!(f, "No new words in {level}. Try Practice Mode to review!")
            }
            SessionPlan::EmptyLevel { level } => write!(f, "No words available for {level}"),
        }
    }
}

/// Chooses session words from the catalog and learner state.
///
/// Planning is side-effect free; nothing is persisted here.
pub struct SessionPlanner<'a> {
    catalog: &'a WordCatalog,
}

impl<'a> SessionPlanner<'a> {
    #[must_use]
    pub fn new(catalog: &'a WordCatalog) -> Self {
        Self { catalog }
    }

    /// Words still to learn at the current level, in catalog order.
    ///
    /// A review flag resurfaces a word even if it is also known.
    #[must_use]
    pub fn learn_words(&self, state: &ProgressState) -> Vec<Word> {
        let level = state.current_learn_level();
        self.catalog
            .at_level(level)
            .filter(|w| !state.is_known(w.key()) || state.is_flagged_for_review(w.key()))
            .cloned()
            .collect()
    }

    /// Plan a Learn session at the learner's current level.
    ///
    /// When nothing is left to learn, the level-completion cache decides
    /// between an advance prompt, overall completion, and a notice.
    #[must_use]
    pub fn plan_learn(&self, state: &ProgressState) -> SessionPlan {
        let level = state.current_learn_level();
        let words = self.learn_words(state);

        match Session::new(SessionMode::Learn, level, words) {
            Ok(session) => SessionPlan::Ready(session),
            Err(_) if state.can_advance(level) => match level.next() {
                Some(next) => SessionPlan::AdvancePrompt {
                    completed: level,
                    next,
                },
                None => SessionPlan::AllLevelsComplete,
            },
            Err(_) => SessionPlan::NothingToReview { level },
        }
    }

    /// Every word at `level`, shuffled with `rng`.
    pub fn practice_words<R: Rng + ?Sized>(&self, level: Level, rng: &mut R) -> Vec<Word> {
        let mut words: Vec<Word> = self.catalog.at_level(level).cloned().collect();
        shuffle(&mut words, rng);
        words
    }

    /// Plan a Practice session over any level.
    pub fn plan_practice<R: Rng + ?Sized>(&self, level: Level, rng: &mut R) -> SessionPlan {
        let words = self.practice_words(level, rng);
        match Session::new(SessionMode::Practice, level, words) {
            Ok(session) => SessionPlan::Ready(session),
            Err(_) => SessionPlan::EmptyLevel { level },
        }
    }
}

/// Uniform in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(entries: &[(&str, Level)]) -> WordCatalog {
        WordCatalog::new(
            entries
                .iter()
                .map(|(key, level)| Word::new(*key, *level, "", ""))
                .collect(),
        )
        .unwrap()
    }

    fn keys(session: &Session) -> Vec<&str> {
        session.words().iter().map(Word::key).collect()
    }

    #[test]
    fn learn_session_uses_catalog_order() {
        let catalog = catalog(&[
            ("one", Level::A1),
            ("other", Level::A2),
            ("two", Level::A1),
            ("three", Level::A1),
        ]);
        let state = ProgressState::new();

        let plan = SessionPlanner::new(&catalog).plan_learn(&state);
        let session = plan.session().expect("ready");
        assert_eq!(session.mode(), SessionMode::Learn);
        assert_eq!(session.level(), Level::A1);
        assert_eq!(keys(session), ["one", "two", "three"]);
    }

    #[test]
    fn learn_skips_known_but_resurfaces_flagged() {
        let catalog = catalog(&[("one", Level::A1), ("two", Level::A1), ("three", Level::A1)]);
        let mut state = ProgressState::new();
        state.mark_known("one");
        state.mark_known("two");
        state.mark_for_review("two");

        let words = SessionPlanner::new(&catalog).learn_words(&state);
        let words: Vec<_> = words.iter().map(Word::key).collect();
        assert_eq!(words, ["two", "three"]);
    }

    #[test]
    fn mastered_level_prompts_advance() {
        let catalog = catalog(&[("one", Level::A1), ("two", Level::A1), ("next", Level::A2)]);
        let mut state = ProgressState::new();
        state.mark_known("one");
        state.mark_known("two");
        state.recompute_level_progress(&catalog);

        let plan = SessionPlanner::new(&catalog).plan_learn(&state);
        assert_eq!(
            plan,
            SessionPlan::AdvancePrompt {
                completed: Level::A1,
                next: Level::A2
            }
        );
        assert!(plan.to_string().contains("Move to A2?"));
    }

    #[test]
    fn mastered_ceiling_completes_everything() {
        let catalog = catalog(&[("summit", Level::C2)]);
        let mut state = ProgressState::new();
        while state.advance_level().is_some() {}
        state.mark_known("summit");
        state.recompute_level_progress(&catalog);

        let plan = SessionPlanner::new(&catalog).plan_learn(&state);
        assert_eq!(plan, SessionPlan::AllLevelsComplete);
    }

    #[test]
    fn empty_level_has_nothing_to_review() {
        let catalog = catalog(&[("later", Level::B1)]);
        let mut state = ProgressState::new();
        state.recompute_level_progress(&catalog);

        let plan = SessionPlanner::new(&catalog).plan_learn(&state);
        assert_eq!(plan, SessionPlan::NothingToReview { level: Level::A1 });
        assert!(!plan.is_ready());
    }

    #[test]
    fn practice_covers_whole_level_regardless_of_progress() {
        let catalog = catalog(&[("a", Level::B2), ("b", Level::B2), ("c", Level::A1)]);
        let mut rng = StdRng::seed_from_u64(7);

        let plan = SessionPlanner::new(&catalog).plan_practice(Level::B2, &mut rng);
        let session = plan.session().expect("ready");
        assert_eq!(session.mode(), SessionMode::Practice);
        let mut got = keys(session);
        got.sort_unstable();
        assert_eq!(got, ["a", "b"]);
    }

    #[test]
    fn practice_on_empty_level_does_not_start() {
        let catalog = catalog(&[("a", Level::A1)]);
        let mut rng = StdRng::seed_from_u64(1);
        let plan = SessionPlanner::new(&catalog).plan_practice(Level::C1, &mut rng);
        assert_eq!(plan, SessionPlan::EmptyLevel { level: Level::C1 });
        assert_eq!(plan.to_string(), "No words available for C1");
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let base: Vec<u32> = (0..32).collect();
        let mut first = base.clone();
        let mut second = base.clone();
        shuffle(&mut first, &mut StdRng::seed_from_u64(42));
        shuffle(&mut second, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut single = vec![9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, [9]);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(
            original in prop::collection::vec(any::<u16>(), 0..64),
            seed in any::<u64>(),
        ) {
            let mut items = original.clone();
            let mut expected = original;
            shuffle(&mut items, &mut StdRng::seed_from_u64(seed));
            items.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(items, expected);
        }

        #[test]
        fn learn_order_is_filtered_catalog_order(
            known in prop::collection::vec(any::<bool>(), 1..24),
        ) {
            let words: Vec<Word> = (0..known.len())
                .map(|i| Word::new(format!("w{i}"), Level::A1, "", ""))
                .collect();
            let catalog = WordCatalog::new(words).unwrap();
            let mut state = ProgressState::new();
            for (i, is_known) in known.iter().enumerate() {
                if *is_known {
                    state.mark_known(&format!("w{i}"));
                }
            }

            let selected: Vec<String> = SessionPlanner::new(&catalog)
                .learn_words(&state)
                .iter()
                .map(|w| w.key().to_owned())
                .collect();
            let expected: Vec<String> = known
                .iter()
                .enumerate()
                .filter(|(_, is_known)| !**is_known)
                .map(|(i, _)| format!("w{i}"))
                .collect();
            prop_assert_eq!(selected, expected);
        }
    }
}
