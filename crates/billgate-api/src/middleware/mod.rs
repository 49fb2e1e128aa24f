//! # Middleware
//!
//! Tower/Axum middleware for the gateway router.

pub mod metrics;
