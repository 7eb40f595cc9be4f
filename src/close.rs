//! Deferred wizard close after a successful submission.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    Pending,
    Fired,
    Cancelled,
}

/// A close scheduled `delay` after submission so the success notice can be read.
///
/// The host owns the actual timer. `fire` reports `true` at most once, and
/// cancelling (e.g. on teardown) after firing or cancelling again is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredClose {
    delay: Duration,
    state: CloseState,
}

impl DeferredClose {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: CloseState::Pending,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay.as_millis().min(u32::MAX as u128) as u32
    }

    pub fn state(&self) -> CloseState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == CloseState::Pending
    }

    /// Timer callback. Returns whether the host should close now.
    pub fn fire(&mut self) -> bool {
        if self.state == CloseState::Pending {
            self.state = CloseState::Fired;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        if self.state == CloseState::Pending {
            self.state = CloseState::Cancelled;
        }
    }
}
