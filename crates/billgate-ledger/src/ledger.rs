//! # Release Ledger
//!
//! Concurrent `BillId → Ticket` map with one deferred reaper per `open`.
//!
//! The ledger is an explicitly constructed value. Clones share the same
//! tickets, so the gateway state can hold one and hand it to every request.
//! Reapers hold only a weak reference: dropping the last clone drops the
//! tickets, and [`ReleaseLedger::shutdown`] tells pending reapers to stop
//! waiting.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use billgate_core::BillId;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::{Duration, Instant};

use crate::ticket::Ticket;

struct Inner {
    tickets: Mutex<HashMap<BillId, Ticket>>,
    shutdown: watch::Sender<bool>,
}

impl Inner {
    /// Conditional clear run by a reaper after its wait.
    ///
    /// Removes the ticket only if its recorded expiry has already passed.
    /// A ticket refreshed while the reaper slept has a later expiry and is
    /// left for the reaper scheduled by that refresh.
    fn reap(&self, bill: BillId) -> bool {
        let mut tickets = self.tickets.lock();
        let now = Instant::now();
        match tickets.get_mut(&bill) {
            Some(ticket) if ticket.is_due_at(now) => {
                ticket.clear();
                tickets.remove(&bill);
                true
            }
            _ => false,
        }
    }
}

/// Shared store of active release tickets.
#[derive(Clone)]
pub struct ReleaseLedger {
    inner: Arc<Inner>,
}

impl ReleaseLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                tickets: Mutex::new(HashMap::new()),
                shutdown,
            }),
        }
    }

    /// Release `bill` for `ttl`, or extend an existing release.
    ///
    /// The zero id is never released; the call is ignored and returns
    /// `false`. So is a `ttl` too large to represent as an instant. Otherwise the ticket is created if missing, marked released
    /// with `expiry = now + ttl`, and one reaper is scheduled to run after
    /// `ttl`. Concurrent opens on the same bill serialize on the map lock;
    /// the last one to take it sets the expiry.
    ///
    /// Must be called from within a Tokio runtime. After [`shutdown`] the
    /// ticket is still recorded but no reaper is scheduled.
    ///
    /// [`shutdown`]: ReleaseLedger::shutdown
    pub fn open(&self, bill: BillId, ttl: Duration) -> bool {
        if bill.is_zero() {
            tracing::debug!("ignoring release of bill 0");
            return false;
        }

        let expiry = {
            let mut tickets = self.inner.tickets.lock();
            let Some(expiry) = Instant::now().checked_add(ttl) else {
                drop(tickets);
                tracing::warn!(%bill, ?ttl, "release ttl overflows the clock; ignoring");
                return false;
            };
            tickets
                .entry(bill)
                .and_modify(|ticket| ticket.refresh(expiry))
                .or_insert_with(|| Ticket::released_until(expiry));
            expiry
        };
        tracing::debug!(%bill, ?ttl, "bill released");

        self.schedule_reaper(bill, expiry);
        true
    }

    /// Whether `bill` currently has a released, unexpired ticket.
    ///
    /// Never mutates the ledger. An expired ticket whose reaper has not yet
    /// run reads as not released.
    pub fn is_released(&self, bill: BillId) -> bool {
        let now = Instant::now();
        self.inner
            .tickets
            .lock()
            .get(&bill)
            .is_some_and(|ticket| ticket.is_active_at(now))
    }

    /// Time left on `bill`'s release, or `None` if it is not released.
    pub fn remaining(&self, bill: BillId) -> Option<Duration> {
        let now = Instant::now();
        self.inner
            .tickets
            .lock()
            .get(&bill)
            .and_then(|ticket| ticket.remaining_at(now))
    }

    /// Number of tickets physically present, including expired ones
    /// whose reaper has not run yet.
    pub fn len(&self) -> usize {
        self.inner.tickets.lock().len()
    }

    /// Whether the ledger holds no tickets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop every pending reaper and refuse to schedule new ones.
    ///
    /// Tickets are left in place; readers keep applying their expiry.
    /// Idempotent.
    pub fn shutdown(&self) {
        self.inner.shutdown.send_replace(true);
        tracing::info!(
            outstanding = self.len(),
            "release ledger shut down; pending reapers cancelled"
        );
    }

    /// Whether [`shutdown`](ReleaseLedger::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    fn schedule_reaper(&self, bill: BillId, expiry: Instant) {
        let mut stop = self.inner.shutdown.subscribe();
        if *stop.borrow_and_update() {
            tracing::debug!(%bill, "ledger shut down; no reaper scheduled");
            return;
        }

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep_until(expiry) => {}
                _ = stop.changed() => return,
            }
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if inner.reap(bill) {
                tracing::debug!(%bill, "release expired");
            } else {
                tracing::trace!(%bill, "reaper superseded by a later release");
            }
        });
    }
}

impl Default for ReleaseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReleaseLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseLedger")
            .field("tickets", &self.len())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}
