//! Bearer credentials for calls to the internal document service.
//!
//! The gateway asks a [`TokenProvider`] for a credential on every upstream
//! request. [`StaticTokenProvider`] hands out one fixed value and stands in
//! until a minting provider with expiring credentials is plugged in.

use zeroize::Zeroizing;

/// Placeholder credential used when no token is configured.
pub const PLACEHOLDER_TOKEN: &str = "token";

/// Source of bearer credentials for upstream requests.
pub trait TokenProvider: Send + Sync {
    /// Return the credential to send. Called once per request.
    fn bearer_token(&self) -> Zeroizing<String>;
}

/// Provider that always returns the same credential.
///
/// Custom `Debug` redacts the value.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: Zeroizing<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
        }
    }
}

impl Default for StaticTokenProvider {
    fn default() -> Self {
        Self::new(PLACEHOLDER_TOKEN)
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Zeroizing<String> {
        self.token.clone()
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
