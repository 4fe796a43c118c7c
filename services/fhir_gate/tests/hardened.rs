use async_trait::async_trait;
use care_context::{CareContextError, CareContextService, OutputResponse};
use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Collaborator that always fails with the configured error.
struct Failing {
    err: CareContextError,
    calls: AtomicUsize,
}

impl Failing {
    fn new(err: CareContextError) -> Arc<Self> {
        Arc::new(Self {
            err,
            calls: AtomicUsize::new(0),
        })
    }

    fn fail(&self) -> Result<String, CareContextError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.err.clone())
    }
}

#[async_trait]
impl CareContextService for Failing {
    async fn generate_otp_for_care_context(
        &self,
        _request: &str,
    ) -> Result<String, CareContextError> {
        self.fail()
    }

    async fn validate_otp_and_create_care_context(
        &self,
        _request: &str,
    ) -> Result<String, CareContextError> {
        self.fail()
    }

    async fn save_care_context_to_store(
        &self,
        _request: &str,
    ) -> Result<String, CareContextError> {
        self.fail()
    }
}

async fn setup(svc: Arc<Failing>) -> (String, Client, tokio::task::JoinHandle<()>) {
    let (addr, handle) = fhir_gate::test::spawn(svc).await;
    (format!("http://{}", addr), Client::new(), handle)
}

const GENERATE: &str = "/careContext/generateOTPForCareContext";
const VALIDATE: &str = "/careContext/validateOTPAndCreateCareContext";
const ERROR_REQ: &str = r#"{"statusCode":5000,"errorMessage":"Failed with generic error","status":"FAILURE"}"#;

// ── Collaborator failures ────────────────────────────────────────

#[tokio::test]
async fn domain_error_is_returned_as_envelope() {
    let svc = Failing::new(CareContextError::Domain {
        status_code: 5002,
        message: "OTP expired".into(),
        status: "FAILURE".into(),
    });
    let (base, http, _h) = setup(svc).await;
    let resp = http.post(format!("{}{}", base, VALIDATE))
        .header("content-type", "application/json")
        .body(ERROR_REQ)
        .send().await.unwrap();
    assert_eq!(resp.status(), 200, "failures travel inside the envelope");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["statusCode"], 5002);
    assert_eq!(body["error"]["errorMessage"], "OTP expired");
    assert_eq!(body["error"]["status"], "FAILURE");
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn unknown_error_is_generic_failure() {
    let svc = Failing::new(CareContextError::unknown("socket closed"));
    let (base, http, _h) = setup(svc).await;
    let first = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "application/json")
        .body(ERROR_REQ)
        .send().await.unwrap()
        .text().await.unwrap();
    assert_eq!(first, OutputResponse::failure(5000, "socket closed", "FAILURE").serialize());

    let second = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "application/json")
        .body(ERROR_REQ)
        .send().await.unwrap()
        .text().await.unwrap();
    assert_eq!(first, second);
}

// ── Absent and odd input ─────────────────────────────────────────

#[tokio::test]
async fn absent_body_is_deterministic_and_skips_collaborator() {
    let svc = Failing::new(CareContextError::unknown("must not be called"));
    let (base, http, _h) = setup(svc.clone()).await;
    for path in [GENERATE, VALIDATE] {
        let a = http.post(format!("{}{}", base, path))
            .header("authorization", "Authorization")
            .send().await.unwrap()
            .text().await.unwrap();
        let b = http.post(format!("{}{}", base, path))
            .header("authorization", "Authorization")
            .send().await.unwrap()
            .text().await.unwrap();
        assert_eq!(a, b, "{path} must be idempotent for an absent body");
        let env = OutputResponse::parse(&a).unwrap();
        assert!(env.error().is_some());
    }
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_forwarded_not_rejected() {
    let svc = Failing::new(CareContextError::domain(400, "unparsable request"));
    let (base, http, _h) = setup(svc.clone()).await;
    let body: Value = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "application/json")
        .body("{not json}")
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(body["error"]["errorMessage"], "unparsable request");
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_authorization_is_accepted() {
    let svc = Failing::new(CareContextError::domain(5000, "x"));
    let (base, http, _h) = setup(svc.clone()).await;
    let resp = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "application/json")
        .body("{}")
        .send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);
}

// ── Transport rejections ─────────────────────────────────────────

#[tokio::test]
async fn non_json_content_type_is_rejected_with_envelope() {
    let svc = Failing::new(CareContextError::unknown("unused"));
    let (base, http, _h) = setup(svc.clone()).await;
    let resp = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "text/xml")
        .body("<otp/>")
        .send().await.unwrap();
    assert_eq!(resp.status(), 415);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["statusCode"], 415);
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_utf8_body_is_rejected_with_envelope() {
    let svc = Failing::new(CareContextError::unknown("unused"));
    let (base, http, _h) = setup(svc.clone()).await;
    let resp = http.post(format!("{}{}", base, VALIDATE))
        .header("content-type", "application/json")
        .body(vec![0xffu8, 0xfe, 0xfd])
        .send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["status"], "FAILURE");
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_body_is_rejected_with_envelope() {
    let svc = Failing::new(CareContextError::unknown("unused"));
    let (addr, _h) = fhir_gate::test::spawn_with_limit(svc.clone(), 64).await;
    let resp = Client::new()
        .post(format!("http://{}{}", addr, GENERATE))
        .header("content-type", "application/json")
        .body("x".repeat(1024))
        .send().await.unwrap();
    assert_eq!(resp.status(), 413);
    let env = OutputResponse::parse(&resp.text().await.unwrap()).unwrap();
    assert_eq!(env.error().unwrap().status_code, 413);
    assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn configured_limit_above_two_mib_is_honored() {
    let svc = Failing::new(CareContextError::domain(5000, "reached collaborator"));
    let (addr, _h) = fhir_gate::test::spawn_with_limit(svc.clone(), 4 * 1024 * 1024).await;
    let resp = Client::new()
        .post(format!("http://{}{}", addr, GENERATE))
        .header("content-type", "application/json")
        .body("x".repeat(3 * 1024 * 1024))
        .send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["errorMessage"], "reached collaborator");
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn json_content_type_is_case_insensitive() {
    let svc = Failing::new(CareContextError::domain(5000, "reached collaborator"));
    let (base, http, _h) = setup(svc.clone()).await;
    let resp = http.post(format!("{}{}", base, GENERATE))
        .header("content-type", "Application/JSON; charset=UTF-8")
        .body("{}")
        .send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(svc.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_on_operation_route_is_not_allowed() {
    let svc = Failing::new(CareContextError::unknown("unused"));
    let (base, http, _h) = setup(svc).await;
    let resp = http.get(format!("{}{}", base, GENERATE)).send().await.unwrap();
    assert_eq!(resp.status(), 405);
}
