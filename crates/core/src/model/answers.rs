use std::collections::BTreeMap;
use thiserror::Error;

/// Number of answer options per question.
pub const OPTION_COUNT: u8 = 4;

/// Question number → selected option (1-based). Absence means unanswered.
pub type AnswerMap = BTreeMap<u32, u8>;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {question} out of range 1..={total}")]
    QuestionOutOfRange { question: u32, total: u32 },

    #[error("option {option} out of range 1..={max}", max = OPTION_COUNT)]
    OptionOutOfRange { option: u8 },
}

//
// ─── ANSWER STORE ──────────────────────────────────────────────────────────────
//

/// In-memory answer sheet for one exam session.
///
/// Single-select per question with toggle semantics: selecting the option a
/// question already holds clears it, any other option replaces the prior one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    total_questions: u32,
    answers: AnswerMap,
}

impl AnswerStore {
    #[must_use]
    pub fn new(total_questions: u32) -> Self {
        Self {
            total_questions,
            answers: AnswerMap::new(),
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Currently selected option for a question, if any.
    #[must_use]
    pub fn selected(&self, question: u32) -> Option<u8> {
        self.answers.get(&question).copied()
    }

    #[must_use]
    pub fn is_answered(&self, question: u32) -> bool {
        self.answers.contains_key(&question)
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        u32::try_from(self.answers.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Select an option for a question, returning the resulting selection.
    ///
    /// Re-selecting the current option clears it (`Ok(None)`); any other
    /// option replaces the prior selection.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` if the question or option is out of range.
    pub fn select(&mut self, question: u32, option: u8) -> Result<Option<u8>, AnswerError> {
        self.validate(question, option)?;

        if self.answers.get(&question) == Some(&option) {
            self.answers.remove(&question);
            Ok(None)
        } else {
            self.answers.insert(question, option);
            Ok(Some(option))
        }
    }

    /// Clear every selection.
    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// Immutable copy of the sheet for persistence and scoring.
    #[must_use]
    pub fn snapshot(&self) -> AnswerMap {
        self.answers.clone()
    }

    /// Replace the sheet with a persisted map, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` for the first out-of-range entry; the store is
    /// left unchanged on error.
    pub fn restore(&mut self, answers: AnswerMap) -> Result<(), AnswerError> {
        for (&question, &option) in &answers {
            self.validate(question, option)?;
        }
        self.answers = answers;
        Ok(())
    }

    fn validate(&self, question: u32, option: u8) -> Result<(), AnswerError> {
        if question == 0 || question > self.total_questions {
            return Err(AnswerError::QuestionOutOfRange {
                question,
                total: self.total_questions,
            });
        }
        if option == 0 || option > OPTION_COUNT {
            return Err(AnswerError::OptionOutOfRange { option });
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_sets_and_replaces() {
        let mut store = AnswerStore::new(20);
        assert_eq!(store.select(3, 2).unwrap(), Some(2));
        assert_eq!(store.selected(3), Some(2));

        assert_eq!(store.select(3, 4).unwrap(), Some(4));
        assert_eq!(store.selected(3), Some(4));
        assert_eq!(store.answered_count(), 1);
    }

    #[test]
    fn reselecting_same_option_toggles_off() {
        let mut store = AnswerStore::new(20);
        store.select(5, 1).unwrap();
        assert_eq!(store.select(5, 1).unwrap(), None);
        assert!(!store.is_answered(5));
    }

    #[test]
    fn double_toggle_restores_prior_state() {
        let mut store = AnswerStore::new(20);
        store.select(7, 3).unwrap();
        let before = store.snapshot();

        store.select(7, 2).unwrap();
        store.select(7, 2).unwrap();
        store.select(7, 3).unwrap();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn rejects_out_of_range_input() {
        let mut store = AnswerStore::new(10);
        assert!(matches!(
            store.select(0, 1),
            Err(AnswerError::QuestionOutOfRange { .. })
        ));
        assert!(matches!(
            store.select(11, 1),
            Err(AnswerError::QuestionOutOfRange { .. })
        ));
        assert!(matches!(
            store.select(1, 0),
            Err(AnswerError::OptionOutOfRange { .. })
        ));
        assert!(matches!(
            store.select(1, 5),
            Err(AnswerError::OptionOutOfRange { .. })
        ));
    }

    #[test]
    fn reset_clears_all() {
        let mut store = AnswerStore::new(20);
        store.select(1, 1).unwrap();
        store.select(2, 2).unwrap();
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.answered_count(), 0);
    }

    #[test]
    fn restore_validates_entries() {
        let mut store = AnswerStore::new(5);
        let good = AnswerMap::from([(1, 2), (5, 4)]);
        store.restore(good.clone()).unwrap();
        assert_eq!(store.snapshot(), good);

        let bad = AnswerMap::from([(1, 2), (6, 1)]);
        assert!(store.restore(bad).is_err());
        // unchanged after a failed restore
        assert_eq!(store.snapshot(), good);
    }
}
