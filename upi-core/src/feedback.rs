//! Short-lived success indicators ("Copied!", "Card saved successfully!").

use std::time::{Duration, Instant};

/// How long a copy confirmation stays visible.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);
/// How long a save confirmation stays visible.
pub const SAVE_CONFIRMATION: Duration = Duration::from_secs(3);

/// A flag that lowers itself once its time-to-live has passed.
#[derive(Debug, Clone, Copy)]
pub struct TransientFlag {
    ttl: Duration,
    raised_until: Option<Instant>,
}

impl TransientFlag {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            raised_until: None,
        }
    }

    /// Raises the flag, restarting its countdown.
    pub fn raise(&mut self, now: Instant) {
        self.raised_until = Some(now + self.ttl);
    }

    pub fn is_raised(&self, now: Instant) -> bool {
        self.raised_until.is_some_and(|until| now < until)
    }

    pub fn reset(&mut self) {
        self.raised_until = None;
    }
}
