use std::sync::Arc;
use tracing::{debug, info};

use exam_core::model::{AnswerStore, ExamIdentity, ExamResult, SessionProgress};
use exam_core::{Clock, ExamTimer};
use storage::repository::{ResultHandoffRepository, Storage};

use crate::answer_source::{fetch_or_fallback, AnswerSource};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::progress::ProgressService;

/// Lifecycle of one exam sitting. `Submitted` is terminal; there is no
/// resume after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Active,
    Submitted,
}

/// Outcome of a single answer selection, handed back to the caller as the
/// UI-refresh signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerUpdate {
    pub question: u32,
    /// The resulting selection; `None` after a toggle-off.
    pub selected: Option<u8>,
    pub answered_count: u32,
    pub total_questions: u32,
}

/// One exam sitting: answer sheet, timer, persistence and submission under a
/// single identity.
///
/// Construction runs the whole `Initializing` phase — answer-key fetch (with
/// degraded fallback), progress restoration offer — and returns an `Active`
/// session. Every `select` persists the sheet; `submit` freezes it into an
/// [`ExamResult`] and hands it to the results flow.
pub struct ExamSession {
    identity: ExamIdentity,
    clock: Clock,
    phase: SessionPhase,
    correct_answers: Vec<u8>,
    answers: AnswerStore,
    timer: ExamTimer,
    progress: ProgressService,
    handoff: Arc<dyn ResultHandoffRepository>,
    restored: bool,
}

impl ExamSession {
    /// Start a session for an identity.
    ///
    /// The answer key is fetched once; on failure the session continues,
    /// degraded, with the configured default question count and an empty key.
    /// A fresh, non-empty stored progress is an offer: it is applied only if
    /// `confirm_restore` returns true, and cleared otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persistence fails while restoring or
    /// clearing offered progress.
    pub async fn start(
        identity: ExamIdentity,
        source: &dyn AnswerSource,
        storage: &Storage,
        clock: Clock,
        config: &SessionConfig,
        confirm_restore: &dyn Fn(&SessionProgress) -> bool,
    ) -> Result<Self, SessionError> {
        let key = fetch_or_fallback(source, &identity, config.default_question_count).await;

        let progress = ProgressService::new(clock, storage.progress.clone(), config.progress_max_age);
        let mut session = Self {
            identity,
            clock,
            phase: SessionPhase::Initializing,
            correct_answers: key.answers,
            answers: AnswerStore::new(key.total_questions),
            timer: ExamTimer::new(),
            progress,
            handoff: storage.results.clone(),
            restored: false,
        };

        session.timer.start(clock.now());
        session.offer_restore(confirm_restore).await?;
        session.phase = SessionPhase::Active;
        Ok(session)
    }

    async fn offer_restore(
        &mut self,
        confirm_restore: &dyn Fn(&SessionProgress) -> bool,
    ) -> Result<(), SessionError> {
        let Some(stored) = self.progress.load(&self.identity).await? else {
            return Ok(());
        };
        if stored.is_empty() {
            return Ok(());
        }

        if !confirm_restore(&stored) {
            // declining is equivalent to staleness: clear and start fresh
            debug!(identity = %self.identity, "restore declined, clearing stored progress");
            self.progress.clear(&self.identity).await?;
            return Ok(());
        }

        match self.answers.restore(stored.answers) {
            Ok(()) => {
                self.timer.resume_from(stored.elapsed_seconds, self.clock.now());
                self.restored = true;
                info!(identity = %self.identity, "restored in-progress answers");
            }
            Err(err) => {
                // a corrupt record is treated like a stale one
                debug!(identity = %self.identity, error = %err, "stored progress invalid, discarding");
                self.progress.clear(&self.identity).await?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn identity(&self) -> &ExamIdentity {
        &self.identity
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True when a prior progress record was applied at start.
    #[must_use]
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.answers.total_questions()
    }

    #[must_use]
    pub fn correct_answers(&self) -> &[u8] {
        &self.correct_answers
    }

    #[must_use]
    pub fn selected(&self, question: u32) -> Option<u8> {
        self.answers.selected(question)
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.answers.answered_count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> u32 {
        self.total_questions().saturating_sub(self.answered_count())
    }

    /// Seconds on the exam clock right now.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds(self.clock.now())
    }

    /// Select (or toggle off) an option, then persist the sheet.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after submission, an
    /// `AnswerError` for out-of-range input, or a persistence error.
    pub async fn select(&mut self, question: u32, option: u8) -> Result<AnswerUpdate, SessionError> {
        self.ensure_active()?;

        let selected = self.answers.select(question, option)?;
        self.save_progress().await?;

        Ok(AnswerUpdate {
            question,
            selected,
            answered_count: self.answers.answered_count(),
            total_questions: self.answers.total_questions(),
        })
    }

    /// Clear the whole sheet and persist the cleared state. The caller is
    /// responsible for confirming with the user first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` after submission, or a
    /// persistence error.
    pub async fn reset_answers(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.answers.reset();
        self.save_progress().await?;
        Ok(())
    }

    /// Submit the exam: stop the clock, clear stored progress, freeze the
    /// sheet into an [`ExamResult`] and hand it to the results flow.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` on a second call, or a
    /// persistence error.
    pub async fn submit(&mut self) -> Result<ExamResult, SessionError> {
        self.ensure_active()?;

        let now = self.clock.now();
        self.timer.stop(now);
        self.progress.clear(&self.identity).await?;

        let result = ExamResult {
            subject: self.identity.subject(),
            year: self.identity.year(),
            exam_type: self.identity.exam_type(),
            total_questions: self.answers.total_questions(),
            answers: self.answers.snapshot(),
            correct_answers: self.correct_answers.clone(),
            elapsed_seconds: self.timer.elapsed_seconds(now),
            submitted_at: now,
        };
        self.handoff.put_result(&result).await?;
        self.phase = SessionPhase::Submitted;
        info!(identity = %self.identity, answered = result.answers.len(), "exam submitted");
        Ok(result)
    }

    async fn save_progress(&self) -> Result<(), SessionError> {
        self.progress
            .save(
                &self.identity,
                self.answers.snapshot(),
                self.elapsed_seconds(),
            )
            .await?;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
            SessionPhase::Initializing | SessionPhase::Active => Ok(()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
