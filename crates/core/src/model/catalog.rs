use std::collections::HashMap;
use thiserror::Error;

use crate::model::{Level, Word};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("word at position {index} has an empty key")]
    EmptyWord { index: usize },

    #[error("duplicate word in catalog: {word:?}")]
    DuplicateWord { word: String },
}

/// Immutable, ordered word list supplied once at startup.
///
/// Catalog order is meaningful: Learn sessions present words in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCatalog {
    words: Vec<Word>,
    index: HashMap<String, usize>,
}

impl WordCatalog {
    /// Build a catalog, rejecting blank and duplicate word keys.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyWord` for a blank key and
    /// `CatalogError::DuplicateWord` when a key appears twice.
    pub fn new(words: Vec<Word>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(words.len());
        for (pos, word) in words.iter().enumerate() {
            if word.key().trim().is_empty() {
                return Err(CatalogError::EmptyWord { index: pos });
            }
            if index.insert(word.key().to_owned(), pos).is_some() {
                return Err(CatalogError::DuplicateWord {
                    word: word.key().to_owned(),
                });
            }
        }
        Ok(Self { words, index })
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Look up a word by its key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Word> {
        self.index.get(key).map(|&pos| &self.words[pos])
    }

    /// Words at `level`, in catalog order.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(move |w| w.level() == level)
    }

    #[must_use]
    pub fn count_at(&self, level: Level) -> usize {
        self.at_level(level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(key: &str, level: Level) -> Word {
        Word::new(key, level, "", "")
    }

    #[test]
    fn keeps_catalog_order_per_level() {
        let catalog = WordCatalog::new(vec![
            word("cat", Level::A1),
            word("gravity", Level::B2),
            word("dog", Level::A1),
            word("bird", Level::A1),
        ])
        .unwrap();

        let a1: Vec<_> = catalog.at_level(Level::A1).map(Word::key).collect();
        assert_eq!(a1, ["cat", "dog", "bird"]);
        assert_eq!(catalog.count_at(Level::B2), 1);
        assert_eq!(catalog.count_at(Level::C2), 0);
        assert_eq!(catalog.get("gravity").map(Word::level), Some(Level::B2));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicates_and_blank_keys() {
        let dup = WordCatalog::new(vec![word("cat", Level::A1), word("cat", Level::B1)]);
        assert_eq!(
            dup.unwrap_err(),
            CatalogError::DuplicateWord {
                word: "cat".into()
            }
        );

        let blank = WordCatalog::new(vec![word("cat", Level::A1), word("  ", Level::A1)]);
        assert_eq!(blank.unwrap_err(), CatalogError::EmptyWord { index: 1 });
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = WordCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
