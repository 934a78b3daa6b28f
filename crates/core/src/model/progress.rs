use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::AnswerMap;

/// Age past which a persisted progress record is discarded instead of offered
/// for restoration.
pub const PROGRESS_MAX_AGE_HOURS: i64 = 24;

/// The persisted, in-flight answer state plus elapsed time for a
/// not-yet-submitted session.
///
/// Created on every answer mutation, read once at session start, deleted on
/// submit or on explicit reset/expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub answers: AnswerMap,
    pub elapsed_seconds: u64,
    pub saved_at: DateTime<Utc>,
}

impl SessionProgress {
    #[must_use]
    pub fn new(answers: AnswerMap, elapsed_seconds: u64, saved_at: DateTime<Utc>) -> Self {
        Self {
            answers,
            elapsed_seconds,
            saved_at,
        }
    }

    /// True when the record is older than the default staleness window.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.is_stale_after(now, Duration::hours(PROGRESS_MAX_AGE_HOURS))
    }

    /// True when the record is older than the given window.
    #[must_use]
    pub fn is_stale_after(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.saved_at > max_age
    }

    /// True when no answers were recorded; an empty record is never offered
    /// for restoration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn fresh_progress_is_not_stale() {
        let saved = fixed_now();
        let progress = SessionProgress::new(AnswerMap::from([(1, 2)]), 60, saved);
        assert!(!progress.is_stale(saved + Duration::hours(23)));
        assert!(!progress.is_stale(saved + Duration::hours(24)));
    }

    #[test]
    fn progress_older_than_a_day_is_stale() {
        let saved = fixed_now();
        let progress = SessionProgress::new(AnswerMap::new(), 0, saved);
        assert!(progress.is_stale(saved + Duration::hours(25)));
    }

    #[test]
    fn empty_check_follows_answers() {
        let progress = SessionProgress::new(AnswerMap::new(), 120, fixed_now());
        assert!(progress.is_empty());

        let progress = SessionProgress::new(AnswerMap::from([(4, 1)]), 120, fixed_now());
        assert!(!progress.is_empty());
    }
}
