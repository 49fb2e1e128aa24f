//! # Canonical Bill Identifiers
//!
//! Bill ids arrive as path segments. They are normalized once, at the edge,
//! into [`BillId`] and every later component (authorization, ledger keys,
//! the internal document URL) uses the canonical decimal rendering.
//!
//! ## Normalization
//!
//! | Input            | Canonical      |
//! |------------------|----------------|
//! | `"2222"`         | `2222`         |
//! | `"0042"`, `"+42"`| `42`           |
//! | `"-7"`           | `-7`           |
//! | `"abc"`, `""`    | `0`            |
//! | `"99999999999"`  | `2147483647`   |
//!
//! Malformed input never produces an error: it collapses to `0`, and `0` is
//! never releasable. Out-of-range input saturates to the nearest 32-bit bound.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// A canonical bill identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(i32);

impl BillId {
    /// The zero id. Assigned to malformed input and never released.
    pub const ZERO: Self = Self(0);

    /// Wrap an already-numeric id.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Normalize a raw path segment.
    ///
    /// Accepts an optional sign followed by decimal digits. Overflow
    /// saturates; anything unparseable becomes [`BillId::ZERO`].
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.parse::<i32>() {
            Ok(value) => Self(value),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Self(i32::MAX),
                IntErrorKind::NegOverflow => Self(i32::MIN),
                _ => Self::ZERO,
            },
        }
    }

    /// Access the numeric value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Whether this is the zero id.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for BillId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for BillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
