use serde::{Deserialize, Serialize};

use crate::model::{QuestionResult, QuestionStatus, ScoreReport};

/// Which subset of graded questions the review list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    #[default]
    All,
    Correct,
    Incorrect,
    Unanswered,
}

impl ReviewFilter {
    fn matches(self, status: QuestionStatus) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Correct => status == QuestionStatus::Correct,
            ReviewFilter::Incorrect => status == QuestionStatus::Incorrect,
            ReviewFilter::Unanswered => status == QuestionStatus::Unanswered,
        }
    }
}

/// Cursor over the filtered per-question results of a score report.
///
/// The filtered view preserves the original question-number order; detail
/// navigation moves within it and stops silently at either boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewNavigator {
    results: Vec<QuestionResult>,
    filter: ReviewFilter,
    view: Vec<usize>,
    current: usize,
}

impl ReviewNavigator {
    #[must_use]
    pub fn new(report: &ScoreReport) -> Self {
        Self::from_results(report.per_question().to_vec())
    }

    #[must_use]
    pub fn from_results(results: Vec<QuestionResult>) -> Self {
        let mut nav = Self {
            results,
            filter: ReviewFilter::All,
            view: Vec::new(),
            current: 0,
        };
        nav.rebuild_view();
        nav
    }

    #[must_use]
    pub fn filter(&self) -> ReviewFilter {
        self.filter
    }

    /// Replace the filter; the view is recomputed and the cursor resets to
    /// the first entry.
    pub fn set_filter(&mut self, filter: ReviewFilter) {
        self.filter = filter;
        self.rebuild_view();
    }

    /// The filtered results, in ascending question-number order.
    pub fn filtered(&self) -> impl Iterator<Item = &QuestionResult> {
        self.view.iter().map(|&idx| &self.results[idx])
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// The result under the cursor, if the filtered view is non-empty.
    #[must_use]
    pub fn current(&self) -> Option<&QuestionResult> {
        self.view.get(self.current).map(|&idx| &self.results[idx])
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.view.is_empty() || self.current + 1 == self.view.len()
    }

    /// Advance the cursor; no-op at the last entry. Returns true on movement.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move the cursor back; no-op at the first entry. Returns true on
    /// movement.
    pub fn prev(&mut self) -> bool {
        if self.is_first() || self.view.is_empty() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a question by number.
    ///
    /// When the question is outside the current filter the filter switches to
    /// `All` so the cursor always lands somewhere visible. Returns false only
    /// if the question number does not exist at all.
    pub fn select_question(&mut self, number: u32) -> bool {
        if let Some(pos) = self.position_in_view(number) {
            self.current = pos;
            return true;
        }

        if !self.results.iter().any(|r| r.number == number) {
            return false;
        }

        self.set_filter(ReviewFilter::All);
        match self.position_in_view(number) {
            Some(pos) => {
                self.current = pos;
                true
            }
            None => false,
        }
    }

    fn position_in_view(&self, number: u32) -> Option<usize> {
        self.view
            .iter()
            .position(|&idx| self.results[idx].number == number)
    }

    fn rebuild_view(&mut self) {
        self.view = self
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.matches(r.status))
            .map(|(idx, _)| idx)
            .collect();
        self.current = 0;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
