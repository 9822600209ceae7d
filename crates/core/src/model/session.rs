use std::fmt;
use thiserror::Error;

use crate::model::{Level, Word};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no words available for session")]
pub struct EmptySessionError;

/// How a session's words were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Unmastered words at the learner's current level, in catalog order.
    Learn,
    /// Every word of a chosen level, shuffled.
    Practice,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Learn => f.write_str("learn"),
            SessionMode::Practice => f.write_str("practice"),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// An ordered, non-empty run through a set of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: SessionMode,
    level: Level,
    words: Vec<Word>,
    current: usize,
}

impl Session {
    /// # Errors
    ///
    /// Returns `EmptySessionError` if `words` is empty.
    pub fn new(
        mode: SessionMode,
        level: Level,
        words: Vec<Word>,
    ) -> Result<Self, EmptySessionError> {
        if words.is_empty() {
            return Err(EmptySessionError);
        }
        Ok(Self {
            mode,
            level,
            words,
            current: 0,
        })
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Sessions are never empty; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Zero-based index of the word being shown.
    #[must_use]
    pub fn index(&self) -> usize {
        self.current
    }

    /// `None` once every word has been passed.
    #[must_use]
    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.current)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.words.len()
    }

    /// One-based position and total, for an "n/m" counter.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        ((self.current + 1).min(self.words.len()), self.words.len())
    }

    /// Move past the current word.
    ///
    /// Returns `SessionStep::Ended` exactly once, when the last word is passed.
    pub fn advance(&mut self) -> SessionStep {
        if self.is_exhausted() {
            return SessionStep::Ended(self.completion());
        }
        self.current += 1;
        if self.is_exhausted() {
            SessionStep::Ended(self.completion())
        } else {
            let (position, total) = self.position();
            SessionStep::Continue { position, total }
        }
    }

    fn completion(&self) -> SessionCompletion {
        SessionCompletion {
            mode: self.mode,
            level: self.level,
            reviewed: self.words.len(),
        }
    }
}

/// Result of stepping a session forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Continue { position: usize, total: usize },
    Ended(SessionCompletion),
}

/// End-of-session outcome handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompletion {
    pub mode: SessionMode,
    pub level: Level,
    pub reviewed: usize,
}

impl SessionCompletion {
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SessionMode::Learn => write!(
                f,
                "Great job! You've reviewed all words in {}!\n\nWhat would you like to do next?",
                self.level
            ),
            SessionMode::Practice => write!(
                f,
                "Practice session complete!\n\nYou reviewed {} words from {}.",
                self.reviewed, self.level
            ),
        }
    }
}
