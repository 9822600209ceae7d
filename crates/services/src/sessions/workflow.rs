use std::sync::Arc;

use rand::Rng;
use tracing::info;

use storage::repository::KeyValueRepository;
use vocab_core::model::{Level, ProgressStats, SessionStep, Word, WordCatalog};

use super::plan::{SessionPlan, SessionPlanner};
use super::runner::SessionRunner;
use crate::error::{ProgressError, SessionError};
use crate::progress_store::ProgressStore;

/// Orchestrates planning, running, and persisting sessions for one learner.
///
/// Built once at startup from a loaded catalog and a storage backend.
pub struct TrainerService {
    catalog: Arc<WordCatalog>,
    store: ProgressStore,
    runner: SessionRunner,
}

impl TrainerService {
    /// Load progress from `repo` and bring its level cache in line with
    /// `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the refreshed progress cannot be saved.
    pub async fn open(
        catalog: Arc<WordCatalog>,
        repo: Arc<dyn KeyValueRepository>,
    ) -> Result<Self, ProgressError> {
        let store = ProgressStore::load(repo).await;
        Self::with_store(catalog, store).await
    }

    /// Like [`TrainerService::open`] but with an already loaded store.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the refreshed progress cannot be saved.
    pub async fn with_store(
        catalog: Arc<WordCatalog>,
        mut store: ProgressStore,
    ) -> Result<Self, ProgressError> {
        store.recompute_level_progress(&catalog).await?;
        Ok(Self {
            catalog,
            store,
            runner: SessionRunner::new(),
        })
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn runner(&self) -> &SessionRunner {
        &self.runner
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        self.store.stats()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Word> {
        self.runner.current()
    }

    fn begin(&mut self, plan: SessionPlan) -> SessionPlan {
        match &plan {
            SessionPlan::Ready(session) => self.runner.start(session.clone()),
            _ => self.runner.stop(),
        }
        plan
    }

    /// Plan a Learn session and start it when words are available.
    pub fn start_learn(&mut self) -> SessionPlan {
        let plan = SessionPlanner::new(&self.catalog).plan_learn(self.store.state());
        self.begin(plan)
    }

    /// Plan a Practice session over `level` and start it when the level has
    /// words.
    pub fn start_practice<R: Rng + ?Sized>(&mut self, level: Level, rng: &mut R) -> SessionPlan {
        let plan = SessionPlanner::new(&self.catalog).plan_practice(level, rng);
        self.begin(plan)
    }

    /// Accept an advance prompt: move up a level and plan Learn again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEligible` if the current level is not
    /// mastered, or `SessionError::Progress` if the new level cannot be saved.
    pub async fn accept_advance(&mut self) -> Result<SessionPlan, SessionError> {
        let level = self.store.state().current_learn_level();
        if !self.store.can_advance(level) {
            return Err(SessionError::NotEligible { level });
        }
        self.store.advance_level().await?;
        Ok(self.start_learn())
    }

    /// Decline an advance prompt and go back to idle.
    pub fn decline_advance(&mut self) {
        self.runner.stop();
    }

    /// Abandon the running session. Progress is already saved.
    pub fn exit_session(&mut self) {
        self.runner.stop();
    }

    /// # Errors
    ///
    /// See [`SessionRunner::mark_known`].
    pub async fn mark_known(&mut self) -> Result<SessionStep, SessionError> {
        self.runner.mark_known(&mut self.store, &self.catalog).await
    }

    /// # Errors
    ///
    /// See [`SessionRunner::mark_for_review`].
    pub async fn mark_for_review(&mut self) -> Result<SessionStep, SessionError> {
        self.runner.mark_for_review(&mut self.store).await
    }

    /// Erase all progress and rebuild the level cache from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if storage rejects the reset or the save.
    pub async fn reset(&mut self) -> Result<(), ProgressError> {
        self.runner.stop();
        self.store.reset().await?;
        self.store.recompute_level_progress(&self.catalog).await?;
        info!("progress reset and level counts rebuilt");
        Ok(())
    }
}
