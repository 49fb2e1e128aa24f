//! # Process Configuration
//!
//! Command-line flags with environment fallbacks. Every flag has a default
//! matching the reference deployment: gateway on `:8080`, internal service
//! on loopback `:8081`, documents under `bills/`, ten-second releases.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Longest release TTL the process accepts: one day.
pub const MAX_RELEASE_TTL_SECS: u64 = 86_400;

/// How the gateway answers requests it does not serve a document for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DenialMode {
    /// `200` with an empty body for unauthenticated, unauthorized, and
    /// not-released requests; upstream status is not propagated.
    Silent,
    /// `401` for unauthenticated, `404` for unauthorized or not released,
    /// upstream status propagated.
    Explicit,
}

/// Gateway behavior knobs carried in the application state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub release_ttl: Duration,
    pub denial_mode: DenialMode,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            release_ttl: Duration::from_secs(10),
            denial_mode: DenialMode::Silent,
        }
    }
}

/// billgate: billing document gateway with time-boxed release tickets.
#[derive(Clone, Parser)]
#[command(name = "billgate", version, about)]
pub struct Settings {
    /// Address of the external gateway listener.
    #[arg(long, env = "BILLGATE_GATEWAY_ADDR", default_value = "0.0.0.0:8080")]
    pub gateway_addr: SocketAddr,

    /// Address of the internal document service listener (loopback/private only).
    #[arg(long, env = "BILLGATE_INTERNAL_ADDR", default_value = "127.0.0.1:8081")]
    pub internal_addr: SocketAddr,

    /// Directory holding one document file per bill id.
    #[arg(long, env = "BILLGATE_BILLS_DIR", default_value = "bills")]
    pub bills_dir: PathBuf,

    /// Base URL the gateway uses to reach the internal service.
    /// Defaults to `http://<internal-addr>`.
    #[arg(long, env = "BILLGATE_INTERNAL_URL")]
    pub internal_url: Option<String>,

    /// Bearer credential shared by the gateway and the internal service.
    #[arg(
        long,
        env = "BILLGATE_INTERNAL_TOKEN",
        default_value = billgate_client::token::PLACEHOLDER_TOKEN,
        hide_env_values = true
    )]
    pub internal_token: String,

    /// Lifetime of a release ticket, in seconds (at most one day).
    #[arg(long, env = "BILLGATE_RELEASE_TTL_SECS", default_value_t = 10)]
    pub release_ttl_secs: u64,

    /// Timeout for calls to the internal service, in seconds.
    #[arg(long, env = "BILLGATE_UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Response shape for denied or withheld requests.
    #[arg(long, value_enum, env = "BILLGATE_DENIAL_MODE", default_value = "silent")]
    pub denial_mode: DenialMode,

    /// Emit logs as JSON lines.
    #[arg(long, env = "BILLGATE_LOG_JSON")]
    pub log_json: bool,
}

impl Settings {
    /// Reject configurations the process must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !billgate_docs::is_trusted_bind(&self.internal_addr) {
            return Err(ConfigError::UntrustedInternalAddr(self.internal_addr));
        }
        if self.release_ttl_secs == 0 {
            return Err(ConfigError::ZeroReleaseTtl);
        }
        if self.release_ttl_secs > MAX_RELEASE_TTL_SECS {
            return Err(ConfigError::ReleaseTtlTooLarge(self.release_ttl_secs));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::ZeroUpstreamTimeout);
        }
        Ok(())
    }

    /// Base URL of the internal service as seen from the gateway.
    pub fn internal_base_url(&self) -> String {
        self.internal_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.internal_addr))
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            release_ttl: Duration::from_secs(self.release_ttl_secs),
            denial_mode: self.denial_mode,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("gateway_addr", &self.gateway_addr)
            .field("internal_addr", &self.internal_addr)
            .field("bills_dir", &self.bills_dir)
            .field("internal_url", &self.internal_base_url())
            .field("internal_token", &"[REDACTED]")
            .field("release_ttl_secs", &self.release_ttl_secs)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("denial_mode", &self.denial_mode)
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("internal listener {0} must bind a loopback or private address")]
    UntrustedInternalAddr(SocketAddr),
    #[error("release TTL must be at least one second")]
    ZeroReleaseTtl,
    #[error("release TTL of {0}s exceeds the {max}s ceiling", max = MAX_RELEASE_TTL_SECS)]
    ReleaseTtlTooLarge(u64),
    #[error("upstream timeout must be at least one second")]
    ZeroUpstreamTimeout,
}
