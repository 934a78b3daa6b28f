use std::sync::Arc;
use tracing::warn;

use exam_core::model::{
    ExamIdentity, ExamResult, ReviewNavigator, ScoreReport,
};
use storage::repository::{ProgressRepository, ResultHandoffRepository, Storage};

use crate::error::ResultError;

/// Everything the results view needs: the frozen submission, its graded
/// report, and a navigator over the per-question review.
pub struct ExamReview {
    pub result: ExamResult,
    pub report: ScoreReport,
    pub navigator: ReviewNavigator,
}

impl ExamReview {
    #[must_use]
    pub fn identity(&self) -> ExamIdentity {
        ExamIdentity::new(self.result.subject, self.result.year, self.result.exam_type)
    }
}

/// Consumes the submitted-result handoff and prepares the review.
#[derive(Clone)]
pub struct ResultService {
    handoff: Arc<dyn ResultHandoffRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl ResultService {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        Self {
            handoff: storage.results.clone(),
            progress: storage.progress.clone(),
        }
    }

    /// Take the handed-off result — exactly once — and grade it.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::NoSubmittedResult` when nothing was handed off
    /// (the caller redirects to the entry point), or a storage error.
    pub async fn take_review(&self) -> Result<ExamReview, ResultError> {
        let Some(result) = self.handoff.take_result().await? else {
            warn!("results page reached without a submitted result");
            return Err(ResultError::NoSubmittedResult);
        };

        let report = result.score_report();
        let navigator = ReviewNavigator::new(&report);
        Ok(ExamReview {
            result,
            report,
            navigator,
        })
    }

    /// Prepare a retry of the same exam: any stored progress for the
    /// identity is cleared so the fresh sitting starts blank.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` on storage failures.
    pub async fn retry(&self, identity: &ExamIdentity) -> Result<(), ResultError> {
        self.progress.clear_progress(identity).await?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{
        AnswerMap, ExamType, Grade, ReviewFilter, SessionProgress, Subject,
    };
    use exam_core::time::fixed_now;

    fn identity() -> ExamIdentity {
        ExamIdentity::new(Subject::English, 2024, ExamType::National)
    }

    fn submitted_result() -> ExamResult {
        // 15 correct, 3 wrong, 2 blank out of 20
        let key = vec![2_u8; 20];
        let mut answers: AnswerMap = (1..=15).map(|q| (q, 2)).collect();
        for q in 16..=18 {
            answers.insert(q, 4);
        }
        ExamResult {
            subject: Subject::English,
            year: 2024,
            exam_type: ExamType::National,
            total_questions: 20,
            answers,
            correct_answers: key,
            elapsed_seconds: 1234,
            submitted_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn review_grades_the_handed_off_result() {
        let storage = Storage::in_memory();
        storage.results.put_result(&submitted_result()).await.unwrap();

        let service = ResultService::new(&storage);
        let mut review = service.take_review().await.unwrap();

        assert_eq!(review.report.score(), 75);
        assert_eq!(review.report.grade(), Grade::Good);
        assert_eq!(review.identity(), identity());

        review.navigator.set_filter(ReviewFilter::Incorrect);
        let numbers: Vec<u32> = review.navigator.filtered().map(|r| r.number).collect();
        assert_eq!(numbers, vec![16, 17, 18]);
    }

    #[tokio::test]
    async fn handoff_is_consumed_exactly_once() {
        let storage = Storage::in_memory();
        storage.results.put_result(&submitted_result()).await.unwrap();

        let service = ResultService::new(&storage);
        service.take_review().await.unwrap();

        assert!(matches!(
            service.take_review().await,
            Err(ResultError::NoSubmittedResult)
        ));
    }

    #[tokio::test]
    async fn missing_handoff_is_a_blocking_error() {
        let storage = Storage::in_memory();
        let service = ResultService::new(&storage);
        assert!(matches!(
            service.take_review().await,
            Err(ResultError::NoSubmittedResult)
        ));
    }

    #[tokio::test]
    async fn retry_clears_stored_progress() {
        let storage = Storage::in_memory();
        let id = identity();
        storage
            .progress
            .save_progress(
                &id,
                &SessionProgress::new(AnswerMap::from([(1, 1)]), 50, fixed_now()),
            )
            .await
            .unwrap();

        ResultService::new(&storage).retry(&id).await.unwrap();
        assert!(storage.progress.load_progress(&id).await.unwrap().is_none());
    }
}
