use std::sync::Arc;

use tracing::{debug, info, warn};

use storage::repository::KeyValueRepository;
use vocab_core::model::{Level, ProgressState, ProgressStats, Word, WordCatalog};

use crate::error::ProgressError;

/// Key under which the progress blob is stored.
pub const PROGRESS_KEY: &str = "wordLearningProgress";

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Sole owner of the learner's durable progress.
///
/// Every mutation is applied to a copy, written as one whole blob, and only
/// then committed in memory. After a failed write the in-memory state still
/// matches what a fresh `load` would return.
pub struct ProgressStore {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
    state: ProgressState,
}

impl ProgressStore {
    /// Load progress under [`PROGRESS_KEY`], falling back to defaults.
    pub async fn load(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self::load_with_key(repo, PROGRESS_KEY).await
    }

    /// Load progress stored under `key`.
    ///
    /// Missing, unreadable, or malformed blobs yield a fresh default state.
    pub async fn load_with_key(repo: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = read_state(repo.as_ref(), &key).await;
        Self { repo, key, state }
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the current state as a single blob.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if encoding or the storage write fails.
    pub async fn save(&self) -> Result<(), ProgressError> {
        write_state(self.repo.as_ref(), &self.key, &self.state).await
    }

    async fn commit(&mut self, next: ProgressState) -> Result<(), ProgressError> {
        write_state(self.repo.as_ref(), &self.key, &next).await?;
        self.state = next;
        Ok(())
    }

    /// Mark `word` known and drop its review flag, then persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the state cannot be persisted.
    pub async fn mark_known(&mut self, word: &str) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.mark_known(word);
        self.commit(next).await
    }

    /// Mark `word` known and refresh its level's cached counts in one save.
    ///
    /// The known set and the level cache land in the same blob, so a failed
    /// write leaves neither changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the state cannot be persisted.
    pub async fn record_known(
        &mut self,
        catalog: &WordCatalog,
        word: &Word,
    ) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.mark_known(word.key());
        next.recompute_level(catalog, word.level());
        self.commit(next).await
    }

    /// Flag `word` for review, then persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the state cannot be persisted.
    pub async fn mark_for_review(&mut self, word: &str) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.mark_for_review(word);
        self.commit(next).await
    }

    #[must_use]
    pub fn is_known(&self, word: &str) -> bool {
        self.state.is_known(word)
    }

    #[must_use]
    pub fn is_flagged_for_review(&self, word: &str) -> bool {
        self.state.is_flagged_for_review(word)
    }

    /// Recount every level against `catalog`, then persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the state cannot be persisted.
    pub async fn recompute_level_progress(
        &mut self,
        catalog: &WordCatalog,
    ) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.recompute_level_progress(catalog);
        self.commit(next).await
    }

    /// Recount a single level against `catalog`, then persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the state cannot be persisted.
    pub async fn recompute_level(
        &mut self,
        catalog: &WordCatalog,
        level: Level,
    ) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.recompute_level(catalog, level);
        self.commit(next).await
    }

    #[must_use]
    pub fn can_advance(&self, level: Level) -> bool {
        self.state.can_advance(level)
    }

    /// Move the learn level up one step and persist.
    ///
    /// At the highest level nothing changes and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the new level cannot be persisted.
    pub async fn advance_level(&mut self) -> Result<Option<Level>, ProgressError> {
        let mut next = self.state.clone();
        let Some(level) = next.advance_level() else {
            debug!("already at the highest level");
            return Ok(None);
        };
        self.commit(next).await?;
        info!(%level, "advanced learn level");
        Ok(Some(level))
    }

    /// Erase persisted progress and start over from defaults.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the stored blob cannot be removed.
    pub async fn reset(&mut self) -> Result<(), ProgressError> {
        self.repo.remove(&self.key).await?;
        self.state = ProgressState::default();
        info!(key = %self.key, "progress reset");
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        self.state.stats()
    }
}

async fn read_state(repo: &dyn KeyValueRepository, key: &str) -> ProgressState {
    match repo.get(key).await {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(state) => state,
            Err(err) => {
                warn!(key, error = %err, "stored progress is malformed; starting fresh");
                ProgressState::default()
            }
        },
        Ok(None) => {
            debug!(key, "no stored progress; starting fresh");
            ProgressState::default()
        }
        Err(err) => {
            warn!(key, error = %err, "could not read stored progress; starting fresh");
            ProgressState::default()
        }
    }
}

async fn write_state(
    repo: &dyn KeyValueRepository,
    key: &str,
    state: &ProgressState,
) -> Result<(), ProgressError> {
    let blob = serde_json::to_string(state)?;
    repo.put(key, &blob).await?;
    Ok(())
}
