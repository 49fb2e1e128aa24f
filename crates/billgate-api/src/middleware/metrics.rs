//! # Gateway Metrics
//!
//! In-process atomic counters. Request and error totals are counted by
//! [`metrics_middleware`]; release outcomes are counted by the billing
//! handler. Exposed as JSON at `GET /metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    errors: AtomicU64,
    released: AtomicU64,
    withheld: AtomicU64,
    unauthenticated: AtomicU64,
    upstream_failures: AtomicU64,
}

/// Shared metrics state. Clones share counters.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    counters: Arc<Counters>,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub errors: u64,
    pub released: u64,
    pub withheld: u64,
    pub unauthenticated: u64,
    pub upstream_failures: u64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_released(&self) {
        self.counters.released.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_withheld(&self) {
        self.counters.withheld.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unauthenticated(&self) {
        self.counters.unauthenticated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_failure(&self) {
        self.counters.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = &self.counters;
        MetricsSnapshot {
            requests: c.requests.load(Ordering::Relaxed),
            errors: c.errors.load(Ordering::Relaxed),
            released: c.released.load(Ordering::Relaxed),
            withheld: c.withheld.load(Ordering::Relaxed),
            unauthenticated: c.unauthenticated.load(Ordering::Relaxed),
            upstream_failures: c.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(
    State(metrics): State<ApiMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    metrics.counters.requests.fetch_add(1, Ordering::Relaxed);
    if response.status().is_server_error() || response.status().is_client_error() {
        metrics.counters.errors.fetch_add(1, Ordering::Relaxed);
    }

    response
}
