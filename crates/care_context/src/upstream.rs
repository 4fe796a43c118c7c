//! Upstream collaborator: forwards the raw request body over HTTP.
//!
//! The OTP logic and the document store live behind `base_url`. This type
//! only moves bytes and classifies failures:
//! - 2xx → body text
//! - non-2xx with an `ErrorBody` JSON body → `Domain` with those fields
//! - other non-2xx → `Domain` with the HTTP status and raw body
//! - transport failure → `Unknown`

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::envelope::{ErrorBody, FAILURE};
use crate::error::{CareContextError, Result};
use crate::service::CareContextService;

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Service credential for the upstream; never the caller's token.
    pub token: Option<String>,
    pub timeout_ms: u64,
}

pub struct UpstreamCareContextService {
    base: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl UpstreamCareContextService {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| CareContextError::unknown(e.to_string()))?;
        Ok(Self {
            base: cfg.base_url.trim_end_matches('/').to_string(),
            http,
            token: cfg.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn post(&self, path: &str, body: &str) -> Result<String> {
        let url = format!("{}/{}", self.base, path);
        debug!(%url, "upstream call");
        let mut req = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_owned());
        if let Some(ref tok) = self.token {
            req = req.bearer_auth(tok);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CareContextError::unknown(format!("upstream unreachable: {e}")))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CareContextError::unknown(format!("upstream body unreadable: {e}")))?;

        if status.is_success() {
            return Ok(text);
        }
        Err(classify_failure(status.as_u16(), text))
    }
}

fn classify_failure(http_status: u16, body: String) -> CareContextError {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(e) => CareContextError::Domain {
            status_code: e.status_code,
            message: e.error_message,
            status: e.status,
        },
        Err(_) => CareContextError::Domain {
            status_code: i32::from(http_status),
            message: body,
            status: FAILURE.into(),
        },
    }
}

#[async_trait]
impl CareContextService for UpstreamCareContextService {
    async fn generate_otp_for_care_context(&self, request: &str) -> Result<String> {
        self.post("generateOTPForCareContext", request).await
    }

    async fn validate_otp_and_create_care_context(&self, request: &str) -> Result<String> {
        self.post("validateOTPAndCreateCareContext", request).await
    }

    async fn save_care_context_to_store(&self, request: &str) -> Result<String> {
        self.post("saveCareContextToMongo", request).await
    }
}
