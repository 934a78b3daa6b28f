use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

use exam_core::Clock;
use exam_core::model::{AnswerMap, ExamIdentity, SessionProgress};
use storage::repository::ProgressRepository;

use crate::error::ProgressError;

/// Persistence adapter for in-flight session progress.
///
/// Wraps the raw repository with clock-stamped saves and the staleness rule:
/// a stored record older than the max age is eagerly deleted and reported
/// absent, never silently resurrected.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    store: Arc<dyn ProgressRepository>,
    max_age: Duration,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn ProgressRepository>, max_age: Duration) -> Self {
        Self {
            clock,
            store,
            max_age,
        }
    }

    /// Persist the current answers and elapsed time, stamped with now.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be stored.
    pub async fn save(
        &self,
        identity: &ExamIdentity,
        answers: AnswerMap,
        elapsed_seconds: u64,
    ) -> Result<(), ProgressError> {
        let progress = SessionProgress::new(answers, elapsed_seconds, self.clock.now());
        self.store.save_progress(identity, &progress).await?;
        Ok(())
    }

    /// Load the stored progress, applying the staleness rule.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on backend failures; staleness is not an
    /// error, the stale record is deleted and `None` returned.
    pub async fn load(
        &self,
        identity: &ExamIdentity,
    ) -> Result<Option<SessionProgress>, ProgressError> {
        let Some(progress) = self.store.load_progress(identity).await? else {
            return Ok(None);
        };

        if progress.is_stale_after(self.clock.now(), self.max_age) {
            debug!(identity = %identity, "discarding stale progress");
            self.store.clear_progress(identity).await?;
            return Ok(None);
        }

        Ok(Some(progress))
    }

    /// Remove the stored progress unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` on backend failures.
    pub async fn clear(&self, identity: &ExamIdentity) -> Result<(), ProgressError> {
        self.store.clear_progress(identity).await?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{ExamType, Subject};
    use exam_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service(clock: Clock) -> (ProgressService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ProgressService::new(clock, repo.clone(), Duration::hours(24));
        (service, repo)
    }

    fn identity() -> ExamIdentity {
        ExamIdentity::new(Subject::Education, 2025, ExamType::National)
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (service, _) = service(fixed_clock());
        let id = identity();
        let answers = AnswerMap::from([(2, 3), (4, 1)]);

        service.save(&id, answers.clone(), 300).await.unwrap();

        let loaded = service.load(&id).await.unwrap().expect("fresh progress");
        assert_eq!(loaded.answers, answers);
        assert_eq!(loaded.elapsed_seconds, 300);
        assert_eq!(loaded.saved_at, fixed_now());
    }

    #[tokio::test]
    async fn stale_progress_is_deleted_on_load() {
        let clock = fixed_clock();
        let (service, repo) = service(clock);
        let id = identity();
        service.save(&id, AnswerMap::from([(1, 1)]), 60).await.unwrap();

        // 25 hours later the record reads as absent and is gone for good
        let mut later = clock;
        later.advance(Duration::hours(25));
        let late_service = ProgressService::new(later, repo.clone(), Duration::hours(24));

        assert!(late_service.load(&id).await.unwrap().is_none());
        assert!(repo.load_progress(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn boundary_age_is_still_fresh() {
        let clock = fixed_clock();
        let (service, repo) = service(clock);
        let id = identity();
        service.save(&id, AnswerMap::from([(1, 1)]), 60).await.unwrap();

        let mut later = clock;
        later.advance(Duration::hours(24));
        let late_service = ProgressService::new(later, repo, Duration::hours(24));

        assert!(late_service.load(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clear_removes_the_record() {
        let (service, repo) = service(fixed_clock());
        let id = identity();
        service.save(&id, AnswerMap::from([(1, 1)]), 10).await.unwrap();

        service.clear(&id).await.unwrap();
        assert!(repo.load_progress(&id).await.unwrap().is_none());
    }
}
