use tracing::info;

use vocab_core::model::{
    Level, Session, SessionCompletion, SessionMode, SessionStep, Word, WordCatalog,
};

use crate::error::SessionError;
use crate::progress_store::ProgressStore;

/// Where the runner is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunnerState {
    #[default]
    Idle,
    InSession(Session),
    Ended(SessionCompletion),
}

/// Steps through one session at a time, forwarding each decision to the
/// progress store.
#[derive(Debug, Default)]
pub struct SessionRunner {
    state: RunnerState,
}

impl SessionRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, RunnerState::InSession(_))
    }

    /// Begin `session`, discarding whatever ran before.
    pub fn start(&mut self, session: Session) {
        info!(
            mode = %session.mode(),
            level = %session.level(),
            words = session.len(),
            "session started"
        );
        self.state = RunnerState::InSession(session);
    }

    /// Begin a session over `words`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `words` is empty; the runner is left
    /// as it was.
    pub fn start_words(
        &mut self,
        mode: SessionMode,
        level: Level,
        words: Vec<Word>,
    ) -> Result<(), SessionError> {
        let session = Session::new(mode, level, words)?;
        self.start(session);
        Ok(())
    }

    /// Drop any session and return to idle.
    pub fn stop(&mut self) {
        self.state = RunnerState::Idle;
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            RunnerState::InSession(session) => Some(session),
            _ => None,
        }
    }

    /// The word on display, or `None` when no session is running.
    #[must_use]
    pub fn current(&self) -> Option<&Word> {
        self.session().and_then(Session::current)
    }

    /// One-based position and total of the running session.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.session().map(Session::position)
    }

    /// Move to the next word, ending the session after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` unless a session is running.
    pub fn advance(&mut self) -> Result<SessionStep, SessionError> {
        let RunnerState::InSession(session) = &mut self.state else {
            return Err(SessionError::NotActive);
        };
        let step = session.advance();
        if let SessionStep::Ended(completion) = step {
            info!(
                mode = %completion.mode,
                level = %completion.level,
                reviewed = completion.reviewed,
                "session ended"
            );
            self.state = RunnerState::Ended(completion);
        }
        Ok(step)
    }

    /// Record the current word as known together with its level's progress,
    /// and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` without a running session, or
    /// `SessionError::Progress` if persisting fails (the runner does not
    /// advance in that case).
    pub async fn mark_known(
        &mut self,
        store: &mut ProgressStore,
        catalog: &WordCatalog,
    ) -> Result<SessionStep, SessionError> {
        let word = self.current().cloned().ok_or(SessionError::NotActive)?;
        store.record_known(catalog, &word).await?;
        self.advance()
    }

    /// Flag the current word for review and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` without a running session, or
    /// `SessionError::Progress` if persisting fails.
    pub async fn mark_for_review(
        &mut self,
        store: &mut ProgressStore,
    ) -> Result<SessionStep, SessionError> {
        let word = self.current().cloned().ok_or(SessionError::NotActive)?;
        store.mark_for_review(word.key()).await?;
        self.advance()
    }
}
