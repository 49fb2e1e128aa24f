//! # End-to-End Gateway Tests
//!
//! Runs the internal document service on an ephemeral loopback port and
//! drives the gateway router against it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use billgate_api::config::{DenialMode, GatewayConfig};
use billgate_api::state::AppState;
use billgate_client::{DocumentClient, DocumentClientConfig, StaticTokenProvider};
use billgate_core::BillId;
use billgate_docs::{AuthConfig, FileStore};
use billgate_ledger::ReleaseLedger;

const ALICE_BILL: &[u8] = b"%PDF-1.4 alice 2222 \x00\xff";
const BOB_BILL: &[u8] = b"bob owes 12.50";

struct Harness {
    app: Router,
    state: AppState,
    _bills: tempfile::TempDir,
}

async fn spawn_document_service(root: &std::path::Path) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = billgate_docs::router(FileStore::new(root), AuthConfig::with_token("token"));
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

fn gateway(addr: SocketAddr, token: &str, config: GatewayConfig) -> AppState {
    let client_config = DocumentClientConfig::new(&format!("http://{addr}"), 5).unwrap();
    let documents =
        DocumentClient::new(client_config, Arc::new(StaticTokenProvider::new(token))).unwrap();
    AppState::new(ReleaseLedger::new(), documents, config)
}

async fn harness_with(token: &str, config: GatewayConfig) -> Harness {
    let bills = tempfile::tempdir().unwrap();
    std::fs::write(bills.path().join("2222"), ALICE_BILL).unwrap();
    std::fs::write(bills.path().join("1111"), BOB_BILL).unwrap();
    // 3333 is granted to john but has no document on disk.

    let addr = spawn_document_service(bills.path()).await;
    let state = gateway(addr, token, config);
    Harness {
        app: billgate_api::app(state.clone()),
        state,
        _bills: bills,
    }
}

async fn harness(mode: DenialMode) -> Harness {
    harness_with(
        "token",
        GatewayConfig {
            denial_mode: mode,
            ..GatewayConfig::default()
        },
    )
    .await
}

async fn get(app: &Router, uri: &str, session: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = session {
        builder = builder.header("Cookie", format!("sessionId={id}"));
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn owner_receives_document_verbatim() {
    let h = harness(DenialMode::Silent).await;

    let (status, body) = get(&h.app, "/billing/2222", Some("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ALICE_BILL);
    assert!(h.state.ledger.is_released(BillId::new(2222)));
}

#[tokio::test]
async fn foreign_bill_is_withheld_without_opening_a_ticket() {
    let h = harness(DenialMode::Silent).await;

    let (status, body) = get(&h.app, "/billing/1111", Some("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(!h.state.ledger.is_released(BillId::new(1111)));
}

#[tokio::test]
async fn missing_or_unknown_session_is_silent_by_default() {
    let h = harness(DenialMode::Silent).await;

    for session in [None, Some("mallory"), Some("")] {
        let (status, body) = get(&h.app, "/billing/2222", session).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }
    assert!(h.state.ledger.is_empty());
}

#[tokio::test]
async fn explicit_mode_reports_denials() {
    let h = harness(DenialMode::Explicit).await;

    let (status, _) = get(&h.app, "/billing/2222", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&h.app, "/billing/1111", Some("alice")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn leading_zeros_address_the_canonical_bill() {
    let h = harness(DenialMode::Silent).await;

    let (status, body) = get(&h.app, "/billing/0002222", Some("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ALICE_BILL);
    assert!(h.state.ledger.is_released(BillId::new(2222)));
}

#[tokio::test]
async fn unparseable_bill_is_withheld() {
    let h = harness(DenialMode::Explicit).await;

    for raw in ["abc", "0", "-0", "99999999999"] {
        let (status, _) = get(&h.app, &format!("/billing/{raw}"), Some("alice")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "bill {raw:?}");
    }
    assert!(h.state.ledger.is_empty());
}

#[tokio::test]
async fn open_ticket_serves_other_callers_until_expiry() {
    let h = harness_with(
        "token",
        GatewayConfig {
            release_ttl: Duration::from_millis(300),
            denial_mode: DenialMode::Silent,
        },
    )
    .await;

    let (_, body) = get(&h.app, "/billing/2222", Some("alice")).await;
    assert_eq!(body, ALICE_BILL);

    // Bob is not granted 2222 but the ticket alice opened is still in force.
    let (status, body) = get(&h.app, "/billing/2222", Some("bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ALICE_BILL);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let (status, body) = get(&h.app, "/billing/2222", Some("bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(!h.state.ledger.is_released(BillId::new(2222)));
}

#[tokio::test]
async fn missing_upstream_document_follows_denial_mode() {
    let silent = harness(DenialMode::Silent).await;
    let (status, body) = get(&silent.app, "/billing/3333", Some("john")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let explicit = harness(DenialMode::Explicit).await;
    let (status, _) = get(&explicit.app, "/billing/3333", Some("john")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_upstream_credential_is_propagated_in_explicit_mode() {
    let h = harness_with(
        "not-the-token",
        GatewayConfig {
            denial_mode: DenialMode::Explicit,
            ..GatewayConfig::default()
        },
    )
    .await;

    let (status, body) = get(&h.app, "/billing/2222", Some("alice")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn unreachable_upstream_is_502() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    for mode in [DenialMode::Silent, DenialMode::Explicit] {
        let state = gateway(
            addr,
            "token",
            GatewayConfig {
                denial_mode: mode,
                ..GatewayConfig::default()
            },
        );
        let app = billgate_api::app(state.clone());

        let (status, body) = get(&app, "/billing/2222", Some("alice")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"]["code"], "BAD_GATEWAY");
        assert!(!error["error"]["message"]
            .as_str()
            .unwrap()
            .contains(&addr.to_string()));
        assert_eq!(state.metrics.snapshot().upstream_failures, 1);
    }
}

#[tokio::test]
async fn metrics_report_outcomes() {
    let h = harness(DenialMode::Silent).await;

    get(&h.app, "/billing/2222", Some("alice")).await;
    get(&h.app, "/billing/1111", Some("alice")).await;
    get(&h.app, "/billing/1111", None).await;

    let (status, body) = get(&h.app, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["released"], 1);
    assert_eq!(report["withheld"], 1);
    assert_eq!(report["unauthenticated"], 1);
    assert_eq!(report["requests"], 3);
    assert_eq!(report["tracked_tickets"], 1);
}

#[tokio::test]
async fn health_probes_answer() {
    let h = harness(DenialMode::Silent).await;

    let (status, body) = get(&h.app, "/health/liveness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
    let (status, body) = get(&h.app, "/health/readiness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ready");
    assert_eq!(h.state.metrics.snapshot().requests, 0);
}
