//! A single release ticket.

use tokio::time::{Duration, Instant};

/// Time-boxed grant for one bill.
///
/// `released` is only ever `true` with an `expiry` that was in the future
/// when it was set. Past its expiry a ticket reads as not released
/// regardless of the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    released: bool,
    expiry: Instant,
}

impl Ticket {
    /// A released ticket that expires at `expiry`.
    pub fn released_until(expiry: Instant) -> Self {
        Self {
            released: true,
            expiry,
        }
    }

    /// Re-release with a new expiry. Last write wins.
    pub fn refresh(&mut self, expiry: Instant) {
        self.released = true;
        self.expiry = expiry;
    }

    /// Withdraw the grant.
    pub fn clear(&mut self) {
        self.released = false;
    }

    pub fn expiry(&self) -> Instant {
        self.expiry
    }

    /// Whether the grant is in force at `now`.
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.released && now < self.expiry
    }

    /// Whether `now` is at or past the recorded expiry.
    pub fn is_due_at(&self, now: Instant) -> bool {
        now >= self.expiry
    }

    /// Time left on an active grant.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.is_active_at(now).then(|| self.expiry - now)
    }
}
