//! # billgate-api — Billing Document Gateway
//!
//! External entry point for billing documents. A caller presents a
//! `sessionId` cookie; if the session maps to an identity that is granted
//! the requested bill, a short-lived release ticket is opened for that bill.
//! While any ticket for the bill is in force, the document is proxied from
//! the internal document service.
//!
//! ## API Surface
//!
//! | Method | Path                  | Module                  |
//! |--------|-----------------------|-------------------------|
//! | GET    | `/billing/{billId}`   | [`routes::billing`]     |
//! | GET    | `/metrics`            | [`middleware::metrics`] |
//! | GET    | `/health/liveness`    | process up              |
//! | GET    | `/health/readiness`   | ready to serve          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::{metrics_middleware, MetricsSnapshot};
use crate::state::AppState;

/// Assemble the gateway router with all routes and middleware.
///
/// Health probes are mounted outside the metrics layer so orchestrator
/// polling does not inflate request counts.
pub fn app(state: AppState) -> Router {
    let gateway = Router::new()
        .merge(routes::billing::router())
        .route("/metrics", get(metrics))
        .layer(from_fn_with_state(state.metrics.clone(), metrics_middleware))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(gateway)
        .layer(TraceLayer::new_for_http())
}

/// Body of `GET /metrics`.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    /// Tickets currently held by the ledger, including ones past expiry
    /// whose reaper has not yet run.
    pub tracked_tickets: usize,
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(MetricsReport {
        counters: state.metrics.snapshot(),
        tracked_tickets: state.ledger.len(),
    })
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the router is assembled.
async fn readiness() -> &'static str {
    "ready"
}
