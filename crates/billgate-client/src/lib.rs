//! # billgate-client — Internal Document Service Client
//!
//! Typed access to the trusted-network document service:
//!
//! | Method | Path                          | Operation              |
//! |--------|-------------------------------|------------------------|
//! | GET    | `/internal/billing/{billId}`  | Raw document for a bill |
//!
//! Every request carries `Authorization: Bearer <token>` where the token
//! comes from the injected [`TokenProvider`]. Upstream status codes are
//! returned to the caller untouched; only transport failures are errors.
//! Requests are never retried.

pub mod config;
pub mod error;
pub mod token;

pub use config::DocumentClientConfig;
pub use error::ClientError;
pub use token::{StaticTokenProvider, TokenProvider};

use std::sync::Arc;
use std::time::Duration;

use billgate_core::BillId;
use bytes::Bytes;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

/// Path prefix of the document endpoint, relative to the base URL.
const API_PREFIX: &str = "internal/billing";

/// A document response exactly as the upstream produced it.
#[derive(Debug, Clone)]
pub struct Document {
    pub status: StatusCode,
    /// Upstream `Content-Type`, if it sent one.
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl Document {
    pub fn is_found(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Client for the internal document service.
#[derive(Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl DocumentClient {
    /// Create a client from configuration and a token provider.
    pub fn new(
        config: DocumentClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the document for `bill`, addressed by its canonical id.
    pub async fn fetch(&self, bill: BillId) -> Result<Document, ClientError> {
        let endpoint = format!("GET /{API_PREFIX}/{bill}");
        let url = format!("{}{API_PREFIX}/{bill}", self.base_url);

        let token = self.tokens.bearer_token();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| ClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        let content_type = resp.headers().get(CONTENT_TYPE).cloned();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Http { endpoint, source: e })?;

        tracing::debug!(%bill, status = status.as_u16(), bytes = body.len(), "document fetched");
        Ok(Document {
            status,
            content_type,
            body,
        })
    }
}

impl std::fmt::Debug for DocumentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
