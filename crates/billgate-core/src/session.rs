//! # Session Identity
//!
//! The gateway identifies callers by the value of their `sessionId` cookie.
//! There is no credential verification: the value itself is the identity,
//! and it is accepted only when it appears in a fixed allow-list.

/// Identities accepted by [`SessionIdentity::authenticate`].
pub const KNOWN_IDENTITIES: [&str; 3] = ["bob", "alice", "john"];

/// An identity that passed the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionIdentity(String);

impl SessionIdentity {
    /// Check a raw session value against the allow-list.
    ///
    /// Matching is exact: no trimming, no case folding.
    pub fn authenticate(raw: &str) -> Option<Self> {
        is_authenticated(raw).then(|| Self(raw.to_string()))
    }

    /// Access the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `raw` is one of the [`KNOWN_IDENTITIES`].
pub fn is_authenticated(raw: &str) -> bool {
    KNOWN_IDENTITIES.contains(&raw)
}
