//! Document client error types.

/// Errors from internal document service calls.
///
/// Upstream non-2xx responses are not errors: they come back as a
/// [`Document`](crate::Document) carrying the upstream status.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, broken body.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The token provider returned a value that is not a valid header.
    #[error("bearer token is not a valid Authorization header value")]
    InvalidToken,
}

impl ClientError {
    /// Whether the upstream could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_connect() || source.is_timeout(),
            Self::InvalidToken => false,
        }
    }
}
