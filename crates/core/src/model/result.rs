use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{score_exam, AnswerMap, ExamType, ScoreReport, Subject};

/// The submitted-result handoff from the exam flow to the results flow.
///
/// Produced exactly once by `submit()` and consumed exactly once by the
/// results side; it freezes everything the scorer and review need so the
/// report can be recomputed without the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub subject: Subject,
    pub year: i32,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub total_questions: u32,
    pub answers: AnswerMap,
    pub correct_answers: Vec<u8>,
    pub elapsed_seconds: u64,
    pub submitted_at: DateTime<Utc>,
}

impl ExamResult {
    /// Grade this result.
    #[must_use]
    pub fn score_report(&self) -> ScoreReport {
        score_exam(&self.answers, &self.correct_answers, self.total_questions)
    }
}
