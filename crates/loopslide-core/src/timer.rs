#![forbid(unsafe_code)]

//! Host timer bookkeeping.
//!
//! The core never sleeps. It asks the host to start or clear a timer through
//! [`HostCommand`](crate::HostCommand)s and receives the callback back as a
//! trigger carrying the [`TimerId`]. A [`TimerSlot`] holds at most one
//! outstanding timer; arming it again hands back the superseded id so the host
//! can clear it, and callbacks for any id other than the armed one are stale.

use core::time::Duration;

/// Identifier of one host timer. Never reused within a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for TimerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Monotonic [`TimerId`] source.
#[derive(Debug, Clone)]
pub struct TimerIds {
    next: u64,
}

impl Default for TimerIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl TimerIds {
    pub fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// At most one outstanding timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    armed: Option<TimerId>,
}

impl TimerSlot {
    /// Currently armed timer, if any.
    #[must_use]
    pub const fn armed(&self) -> Option<TimerId> {
        self.armed
    }

    /// Arm `id`, returning the timer it replaces.
    pub fn arm(&mut self, id: TimerId) -> Option<TimerId> {
        self.armed.replace(id)
    }

    /// Disarm, returning the timer that was outstanding.
    pub fn disarm(&mut self) -> Option<TimerId> {
        self.armed.take()
    }

    /// Whether a callback for `id` is live.
    #[must_use]
    pub fn is_current(&self, id: TimerId) -> bool {
        self.armed == Some(id)
    }

    /// Consume a one-shot callback. Returns `false` for stale ids.
    pub fn fire_once(&mut self, id: TimerId) -> bool {
        if self.is_current(id) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
