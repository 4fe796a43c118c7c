use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::auth::CallerToken;
use crate::error::GateError;
use crate::AppState;

/// Raw body as the controller sees it: empty means absent.
fn request_text(body: &Bytes) -> Result<Option<&str>, GateError> {
    if body.is_empty() {
        return Ok(None);
    }
    std::str::from_utf8(body)
        .map(Some)
        .map_err(|_| GateError::bad_request("request body is not valid UTF-8"))
}

fn envelope(serialized: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        serialized,
    )
        .into_response()
}

pub async fn generate_otp(
    State(state): State<AppState>,
    token: CallerToken,
    body: Bytes,
) -> Result<Response, GateError> {
    let request = request_text(&body)?;
    let out = state.controller.generate_otp(request, token.token()).await;
    Ok(envelope(out))
}

pub async fn validate_otp_and_create_care_context(
    State(state): State<AppState>,
    token: CallerToken,
    body: Bytes,
) -> Result<Response, GateError> {
    let request = request_text(&body)?;
    let out = state
        .controller
        .validate_otp_and_create_care_context(request, token.token())
        .await;
    Ok(envelope(out))
}

pub async fn save_care_context_to_mongo(
    State(state): State<AppState>,
    token: CallerToken,
    body: Bytes,
) -> Result<Response, GateError> {
    let request = request_text(&body)?;
    let out = state
        .controller
        .save_care_context_to_store(request, token.token())
        .await;
    Ok(envelope(out))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({"ok": true}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_absent_request() {
        assert_eq!(request_text(&Bytes::new()).unwrap(), None);
    }

    #[test]
    fn whitespace_body_is_forwarded() {
        let b = Bytes::from_static(b"  ");
        assert_eq!(request_text(&b).unwrap(), Some("  "));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let b = Bytes::from_static(&[0xff, 0xfe, 0x00]);
        let err = request_text(&b).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
