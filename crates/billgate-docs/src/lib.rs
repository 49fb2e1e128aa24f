//! # billgate-docs — Internal Document Service
//!
//! Serves raw billing documents to the gateway. Trusted network only: the
//! gateway is the sole intended caller and the listener must be bound to a
//! loopback or private address (see [`is_trusted_bind`]).
//!
//! ## API Surface
//!
//! | Method | Path                          | Response                         |
//! |--------|-------------------------------|----------------------------------|
//! | GET    | `/internal/billing/{billId}`  | 200 raw bytes, 404, or 401       |
//! | GET    | `/health`                     | 200                              |
//!
//! Documents are read from `<root>/<billId>` on every request, so files
//! dropped into the root are served without a restart.

pub mod auth;
pub mod store;

pub use auth::AuthConfig;
pub use store::FileStore;

use std::net::{IpAddr, SocketAddr};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the internal service router.
///
/// `/health` sits outside the authorization middleware.
pub fn router(store: FileStore, auth: AuthConfig) -> Router {
    let documents = Router::new()
        .route("/internal/billing/{bill_id}", get(get_document))
        .layer(from_fn(auth::require_authorization))
        .layer(axum::Extension(auth))
        .with_state(store);

    Router::new()
        .route("/health", get(health))
        .merge(documents)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_document(State(store): State<FileStore>, Path(bill_id): Path<String>) -> Response {
    match store.read(&bill_id).await {
        Ok(Some(bytes)) => {
            tracing::debug!(bill = %bill_id, bytes = bytes.len(), "document served");
            bytes.into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::warn!(bill = %bill_id, error = %e, "document unreadable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Whether `addr` is acceptable for the internal listener: loopback, or a
/// private / link-local / unique-local address.
pub fn is_trusted_bind(addr: &SocketAddr) -> bool {
    match addr.ip() {
        IpAddr::V4(ip) => ip.is_loopback() || ip.is_private() || ip.is_link_local(),
        IpAddr::V6(ip) => {
            let first = ip.segments()[0];
            ip.is_loopback() || (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
        }
    }
}
