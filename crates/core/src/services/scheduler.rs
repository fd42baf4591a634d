use std::time::{Duration, Instant};

/// Default quiescence interval before a pending recompute fires.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(400);

/// Debounce contract for simulation recomputes.
///
/// Every input change schedules a recompute after a fixed quiescence
/// interval; a newer change before the interval elapses cancels the pending
/// one and restarts the clock, so only one recompute is ever in flight per
/// plan. All methods take `now` explicitly, so the contract runs in batch
/// or headless tests without a platform timer.
#[derive(Debug, Clone)]
pub struct RecomputeScheduler {
    quiescence: Duration,
    deadline: Option<Instant>,
}

impl RecomputeScheduler {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            deadline: None,
        }
    }

    /// Schedule a recompute `quiescence` after `now`, superseding any
    /// pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiescence);
    }

    /// Drop the pending recompute, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// `true` once a scheduled recompute's quiescence has elapsed. Clears
    /// the pending state, so each scheduled recompute fires at most once.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending recompute becomes due, if one is scheduled.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for RecomputeScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}
