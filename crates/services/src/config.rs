use chrono::Duration;

use exam_core::model::PROGRESS_MAX_AGE_HOURS;

/// Tunables for session construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Question count assumed when the answer key cannot be fetched.
    pub default_question_count: u32,
    /// Age past which stored progress is discarded instead of offered.
    pub progress_max_age: Duration,
}

impl SessionConfig {
    #[must_use]
    pub fn with_default_question_count(mut self, count: u32) -> Self {
        self.default_question_count = count;
        self
    }

    #[must_use]
    pub fn with_progress_max_age(mut self, max_age: Duration) -> Self {
        self.progress_max_age = max_age;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_question_count: 20,
            progress_max_age: Duration::hours(PROGRESS_MAX_AGE_HOURS),
        }
    }
}
