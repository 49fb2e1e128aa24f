//! # billgate-ledger — Release Tickets
//!
//! A release ticket is a short-lived grant recording that one bill's
//! document may currently be fetched. The [`ReleaseLedger`] owns every
//! ticket; callers only ever see `bool`s and durations.
//!
//! ## Lifecycle
//!
//! ```text
//! open(bill, ttl) ──► RELEASED (expiry = now + ttl) ──► reaper wakes at expiry
//!        ▲                     │                              │
//!        └── open again ───────┘ (expiry pushed forward)      ▼
//!                                             now >= expiry ? removed : left alone
//! ```
//!
//! Each `open` schedules exactly one reaper. A reaper only removes the
//! ticket if the expiry it finds is already in the past, so a refresh made
//! while it slept keeps the ticket alive. Readers apply the same expiry
//! check, so a ticket is never reported released after its expiry even if
//! its reaper has not run yet.
//!
//! ## Concurrency
//!
//! The ticket map sits behind one `parking_lot::Mutex`. No lock is held
//! across an `.await`; reapers sleep unlocked and take the lock only for
//! the conditional removal.

pub mod ledger;
pub mod ticket;

pub use ledger::ReleaseLedger;
pub use ticket::Ticket;
