//! # Billing Gateway Route
//!
//! `GET /billing/{billId}` with a `sessionId` cookie.
//!
//! ## Request State Machine
//!
//! ```text
//! Unauthenticated ──(cookie in allow-list)──► Authenticated
//! Authenticated ──(policy grants bill, bill ≠ 0)──► Authorized ──► open ticket
//! Authenticated ──(otherwise)──► Denied
//! {Authorized | Denied} ──(ledger says released)──► ReleasedAndProxied
//! {Authorized | Denied} ──(otherwise)──► Withheld
//! ```
//!
//! A denied caller can still be served while another caller's release of
//! the same bill is in force: the release check runs regardless of the
//! authorization outcome.
//!
//! ## Responses
//!
//! | Outcome            | `silent`                 | `explicit`          |
//! |--------------------|--------------------------|---------------------|
//! | Unauthenticated    | 200, empty               | 401                 |
//! | Withheld           | 200, empty               | 404                 |
//! | ReleasedAndProxied | 200, upstream body       | upstream status + body |
//! | Upstream down      | 502                      | 502                 |

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::CookieJar;
use billgate_client::Document;
use billgate_core::{BillId, SessionIdentity};

use crate::config::DenialMode;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session identity.
pub const SESSION_COOKIE: &str = "sessionId";

pub fn router() -> Router<AppState> {
    Router::new().route("/billing/{bill_id}", get(get_bill))
}

/// Terminal state of one gateway request.
#[derive(Debug)]
enum Outcome {
    Unauthenticated,
    Withheld,
    Released(Document),
}

async fn get_bill(
    State(state): State<AppState>,
    Path(raw_bill): Path<String>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let outcome = resolve(&state, &raw_bill, &jar).await?;
    Ok(render(outcome, state.config.denial_mode))
}

async fn resolve(state: &AppState, raw_bill: &str, jar: &CookieJar) -> Result<Outcome, AppError> {
    let Some(identity) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionIdentity::authenticate(cookie.value()))
    else {
        tracing::info!(bill = %raw_bill, "request rejected: no recognized session");
        state.metrics.record_unauthenticated();
        return Ok(Outcome::Unauthenticated);
    };

    let bill = BillId::parse_lossy(raw_bill);

    if state.policy.authorize(&identity, bill) && !bill.is_zero() {
        state.ledger.open(bill, state.config.release_ttl);
        tracing::info!(%identity, %bill, "release opened");
    } else {
        tracing::debug!(%identity, %bill, "release not authorized");
    }

    if !state.ledger.is_released(bill) {
        tracing::info!(%identity, %bill, "document withheld");
        state.metrics.record_withheld();
        return Ok(Outcome::Withheld);
    }

    let document = state.documents.fetch(bill).await.map_err(|e| {
        state.metrics.record_upstream_failure();
        AppError::from(e)
    })?;
    tracing::info!(
        %identity,
        %bill,
        upstream_status = document.status.as_u16(),
        bytes = document.body.len(),
        "document proxied"
    );
    state.metrics.record_released();
    Ok(Outcome::Released(document))
}

fn render(outcome: Outcome, mode: DenialMode) -> Response {
    match (outcome, mode) {
        (Outcome::Unauthenticated | Outcome::Withheld, DenialMode::Silent) => {
            StatusCode::OK.into_response()
        }
        (Outcome::Unauthenticated, DenialMode::Explicit) => {
            AppError::Unauthorized("missing or unknown session".into()).into_response()
        }
        (Outcome::Withheld, DenialMode::Explicit) => {
            AppError::NotFound("bill is not released".into()).into_response()
        }
        (Outcome::Released(doc), DenialMode::Silent) => proxied(StatusCode::OK, doc),
        (Outcome::Released(doc), DenialMode::Explicit) => proxied(doc.status, doc),
    }
}

/// Relay an upstream document with its own content type, or none.
fn proxied(status: StatusCode, doc: Document) -> Response {
    let mut response = (status, doc.body).into_response();
    let headers = response.headers_mut();
    match doc.content_type {
        Some(value) => {
            headers.insert(header::CONTENT_TYPE, value);
        }
        None => {
            headers.remove(header::CONTENT_TYPE);
        }
    }
    response
}
