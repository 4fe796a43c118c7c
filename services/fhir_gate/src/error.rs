//! Transport-level rejections, rendered in the same envelope shape the
//! controller returns.
//!
//! ```json
//! { "error": { "statusCode": 415, "errorMessage": "...", "status": "FAILURE" } }
//! ```

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use care_context::envelope::{OutputResponse, FAILURE};

#[derive(Debug)]
pub struct GateError {
    pub status: StatusCode,
    pub message: String,
}

impl GateError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn unsupported_media_type() -> Self {
        Self {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "content-type must be application/json".into(),
        }
    }

    pub fn payload_too_large() -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "request body exceeds the configured limit".into(),
        }
    }

    pub fn envelope(&self) -> OutputResponse {
        OutputResponse::failure(i32::from(self.status.as_u16()), self.message.clone(), FAILURE)
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.envelope().serialize(),
        )
            .into_response()
    }
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for GateError {}
