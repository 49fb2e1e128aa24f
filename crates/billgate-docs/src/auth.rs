//! # Authorization Header Middleware
//!
//! Every document request must carry an `Authorization` header.
//!
//! - With no expected token configured, presence of the header is enough.
//! - With a token configured, the header must be `Bearer <token>`, compared
//!   in constant time.
//!
//! Failures answer `401 Unauthorized` with an empty body.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage in logs.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub token: Option<Zeroizing<String>>,
}

impl AuthConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(Zeroizing::new(token.into())),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Constant-time comparison of bearer tokens.
///
/// When lengths differ, performs a dummy comparison so timing does not
/// depend on how much of the prefix matched.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Reject requests without an acceptable `Authorization` header.
pub async fn require_authorization(request: Request, next: Next) -> Response {
    let config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let accepted = match (header_value, config.token.as_deref()) {
        (None, _) => {
            tracing::warn!("document request rejected: missing authorization header");
            false
        }
        (Some(_), None) => true,
        (Some(value), Some(expected)) => match value.strip_prefix("Bearer ") {
            Some(provided) if constant_time_token_eq(provided, expected) => true,
            Some(_) => {
                tracing::warn!("document request rejected: invalid bearer token");
                false
            }
            None => {
                tracing::warn!("document request rejected: non-Bearer authorization scheme");
                false
            }
        },
    };

    if accepted {
        next.run(request).await
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}
