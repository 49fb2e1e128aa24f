//! # billgate — Binary Entry Point
//!
//! Starts both listeners in one process: the external gateway and the
//! internal document service. Configuration comes from flags with
//! `BILLGATE_*` environment fallbacks; see [`billgate_api::config::Settings`].

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;

use billgate_api::config::Settings;
use billgate_api::state::AppState;
use billgate_client::{DocumentClient, DocumentClientConfig, StaticTokenProvider};
use billgate_docs::{AuthConfig, FileStore};
use billgate_ledger::ReleaseLedger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    init_tracing(settings.log_json);
    settings.validate()?;
    tracing::debug!(?settings, "configuration loaded");

    let ledger = ReleaseLedger::new();

    let client_config =
        DocumentClientConfig::new(&settings.internal_base_url(), settings.upstream_timeout_secs)
            .context("invalid internal service URL")?;
    let tokens = Arc::new(StaticTokenProvider::new(settings.internal_token.clone()));
    let documents = DocumentClient::new(client_config, tokens)
        .context("failed to build internal service client")?;

    let gateway = billgate_api::app(AppState::new(
        ledger.clone(),
        documents,
        settings.gateway_config(),
    ));
    let internal = billgate_docs::router(
        FileStore::new(settings.bills_dir.clone()),
        AuthConfig::with_token(settings.internal_token.clone()),
    );

    let gateway_listener = tokio::net::TcpListener::bind(settings.gateway_addr)
        .await
        .with_context(|| format!("failed to bind gateway on {}", settings.gateway_addr))?;
    let internal_listener = tokio::net::TcpListener::bind(settings.internal_addr)
        .await
        .with_context(|| format!("failed to bind internal service on {}", settings.internal_addr))?;

    tracing::info!(addr = %settings.gateway_addr, "billing gateway listening");
    tracing::info!(
        addr = %settings.internal_addr,
        bills_dir = %settings.bills_dir.display(),
        "internal document service listening"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        tracing::info!("shutting down");
        shutdown_tx.send_replace(true);
    });

    let gateway_server = axum::serve(gateway_listener, gateway)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx.clone()));
    let internal_server = axum::serve(internal_listener, internal)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx));

    let result = tokio::try_join!(
        async { gateway_server.await.context("gateway server failed") },
        async { internal_server.await.context("internal service failed") },
    );

    ledger.shutdown();

    result.map(|_| ())
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            // Signal listener gone; keep serving.
            std::future::pending::<()>().await;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
