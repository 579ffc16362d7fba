//! Transient validation warning

use std::time::{Duration, Instant};

/// A non-blocking message that disappears on its own
#[derive(Debug, Clone)]
pub struct TransientWarning {
    pub message: String,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl TransientWarning {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
            duration,
        }
    }

    /// Check if the warning should be dismissed
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}
