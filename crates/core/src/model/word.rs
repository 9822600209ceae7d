use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Level;

/// A single vocabulary entry from the word catalog.
///
/// `word` doubles as the unique key used by learner progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    word: String,
    level: Level,
    #[serde(default, deserialize_with = "null_as_empty")]
    meaning: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    sample_sentence: String,
}

impl Word {
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        level: Level,
        meaning: impl Into<String>,
        sample_sentence: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            level,
            meaning: meaning.into(),
            sample_sentence: sample_sentence.into(),
        }
    }

    /// The word itself, also its progress key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Meaning text; empty when the catalog entry had none.
    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    /// Example sentence; empty when the catalog entry had none.
    #[must_use]
    pub fn sample_sentence(&self) -> &str {
        &self.sample_sentence
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
