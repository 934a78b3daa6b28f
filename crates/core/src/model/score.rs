use serde::{Deserialize, Serialize};

use crate::model::AnswerMap;

//
// ─── QUESTION RESULTS ──────────────────────────────────────────────────────────
//

/// Outcome classification for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Correct,
    Incorrect,
    Unanswered,
}

/// Per-question line of a score report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub number: u32,
    pub user_answer: Option<u8>,
    pub correct_answer: Option<u8>,
    pub status: QuestionStatus,
}

//
// ─── GRADE BANDS ───────────────────────────────────────────────────────────────
//

/// Labeled score-threshold tier. Bands are evaluated top-down by minimum
/// score; the highest matching threshold wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Grade {
    /// Bands in descending threshold order.
    pub const BANDS: [Grade; 4] = [Grade::Excellent, Grade::Good, Grade::Average, Grade::Poor];

    /// Minimum score required for this band.
    #[must_use]
    pub fn min_score(self) -> u8 {
        match self {
            Grade::Excellent => 90,
            Grade::Good => 70,
            Grade::Average => 50,
            Grade::Poor => 0,
        }
    }

    /// Human-readable band label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Average => "average",
            Grade::Poor => "poor",
        }
    }

    /// The band for a 0..=100 score.
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        for band in Self::BANDS {
            if score >= band.min_score() {
                return band;
            }
        }
        Grade::Poor
    }
}

//
// ─── SCORE REPORT ──────────────────────────────────────────────────────────────
//

/// The full graded outcome of a submitted session.
///
/// Derived, never mutated after creation; recompute rather than patch.
/// `correct + incorrect + unanswered == total_questions` holds by
/// construction, and `per_question` covers every question in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    correct: u32,
    incorrect: u32,
    unanswered: u32,
    score: u8,
    grade: Grade,
    total_questions: u32,
    per_question: Vec<QuestionResult>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn unanswered(&self) -> u32 {
        self.unanswered
    }

    /// Score in 0..=100, rounded half-up.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn per_question(&self) -> &[QuestionResult] {
        &self.per_question
    }
}

/// Grade the answer sheet against the correct-answer key.
///
/// The key is ordered, index 0 = question 1, and may be shorter than
/// `total_questions`; a question past the end of the key has no recorded
/// correct answer. An unanswered question is `Unanswered` regardless of the
/// key; an answered question only counts `Correct` when the key records the
/// same option — answering a question with no recorded answer scores
/// `Incorrect`, never skipped.
#[must_use]
pub fn score_exam(answers: &AnswerMap, correct_answers: &[u8], total_questions: u32) -> ScoreReport {
    let mut correct = 0_u32;
    let mut incorrect = 0_u32;
    let mut unanswered = 0_u32;
    let mut per_question = Vec::with_capacity(total_questions as usize);

    for number in 1..=total_questions {
        let user_answer = answers.get(&number).copied();
        let correct_answer = correct_answers.get(number as usize - 1).copied();

        let status = match user_answer {
            None => {
                unanswered += 1;
                QuestionStatus::Unanswered
            }
            Some(picked) if correct_answer == Some(picked) => {
                correct += 1;
                QuestionStatus::Correct
            }
            Some(_) => {
                incorrect += 1;
                QuestionStatus::Incorrect
            }
        };

        per_question.push(QuestionResult {
            number,
            user_answer,
            correct_answer,
            status,
        });
    }

    let score = if total_questions == 0 {
        0
    } else {
        let ratio = f64::from(correct) / f64::from(total_questions) * 100.0;
        // round() is half-away-from-zero, which is half-up for non-negatives
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            ratio.round() as u8
        }
    };

    ScoreReport {
        correct,
        incorrect,
        unanswered,
        score,
        grade: Grade::for_score(score),
        total_questions,
        per_question,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
