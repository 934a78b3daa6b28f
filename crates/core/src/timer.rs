use chrono::{DateTime, Duration, Utc};

/// Elapsed-time accumulator for a running exam.
///
/// The elapsed value is recomputed from the start instant on every poll
/// rather than accumulated incrementally, so a suspended caller that stops
/// polling for a while does not lose time. Timestamps come from the caller's
/// clock to keep time deterministic in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExamTimer {
    started_at: Option<DateTime<Utc>>,
    frozen: Option<u64>,
}

impl ExamTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin counting from `now`.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.frozen = None;
    }

    /// Continue a restored session: shifts the start instant to
    /// `now - prior_elapsed` so the clock picks up where it left off.
    pub fn resume_from(&mut self, prior_elapsed_seconds: u64, now: DateTime<Utc>) {
        let prior = Duration::seconds(i64::try_from(prior_elapsed_seconds).unwrap_or(i64::MAX));
        self.started_at = Some(now - prior);
        self.frozen = None;
    }

    /// Seconds elapsed as of `now`; the frozen value once stopped.
    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        if let Some(frozen) = self.frozen {
            return frozen;
        }
        match self.started_at {
            Some(start) => u64::try_from((now - start).num_seconds()).unwrap_or(0),
            None => 0,
        }
    }

    /// Freeze the timer at its value as of `now`. Stopping an already
    /// stopped timer is a no-op.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed_seconds(now));
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.frozen.is_none()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.frozen.is_some()
    }
}
