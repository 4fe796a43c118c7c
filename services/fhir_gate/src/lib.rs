pub mod api;
pub mod auth;
pub mod error;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use care_context::{CareContextController, CareContextService};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::GateError;

pub type SharedService = Arc<dyn CareContextService>;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<CareContextController<SharedService>>,
}

impl AppState {
    pub fn new(service: SharedService) -> Self {
        Self {
            controller: Arc::new(CareContextController::new(service)),
        }
    }
}

pub fn app(service: SharedService) -> Router {
    app_with_limit(service, *fhir_config::MAX_BODY_BYTES)
}

pub fn app_with_limit(service: SharedService, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route("/careContext/generateOTPForCareContext", post(api::generate_otp))
        .route(
            "/careContext/validateOTPAndCreateCareContext",
            post(api::validate_otp_and_create_care_context),
        )
        .route("/careContext/saveCareContextToMongo", post(api::save_care_context_to_mongo))
        // The tower-http limit replaces axum's fixed 2 MiB default.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::map_response(envelope_limit_rejection))
        .layer(middleware::from_fn(require_json_content_type))
        .with_state(AppState::new(service))
}

/// Middleware: a POST that declares a content-type must declare JSON.
/// Requests without the header pass, so an absent body needs no headers.
async fn require_json_content_type(req: Request, next: Next) -> Response {
    let acceptable = match req.method().as_str() {
        "POST" => req
            .headers()
            .get("content-type")
            .map(|v| {
                v.to_str()
                    .map(is_json_media_type)
                    .unwrap_or(false)
            })
            .unwrap_or(true),
        _ => true,
    };
    if !acceptable {
        return GateError::unsupported_media_type().into_response();
    }
    next.run(req).await
}

fn is_json_media_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    media_type.eq_ignore_ascii_case("application/json")
}

/// Middleware: tower-http answers an over-limit body with a plain-text 413;
/// re-render it as an error envelope.
async fn envelope_limit_rejection(resp: Response) -> Response {
    let is_envelope = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(is_json_media_type)
        .unwrap_or(false);
    if resp.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_envelope {
        return GateError::payload_too_large().into_response();
    }
    resp
}

pub mod test {
    use super::SharedService;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn the gate on a random port around `service`. Returns the
    /// address and the server task's JoinHandle; dropping the handle
    /// detaches the task, so the server runs until the test runtime ends.
    pub async fn spawn(service: SharedService) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        serve(super::app(service)).await
    }

    pub async fn spawn_with_limit(
        service: SharedService,
        max_body_bytes: usize,
    ) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        serve(super::app_with_limit(service, max_body_bytes)).await
    }

    async fn serve(app: axum::Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, handle)
    }
}
