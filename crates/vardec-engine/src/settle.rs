use std::time::{Duration, Instant};

/// Coalescing debounce driven by an explicit clock.
///
/// Every `trigger` restarts the quiet period; `take_ready` fires once the
/// period has elapsed since the most recent trigger, then disarms.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl SettleTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per quiet period that has fully elapsed.
    pub fn take_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
