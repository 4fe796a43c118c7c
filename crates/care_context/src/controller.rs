//! Request adapter for the care-context OTP workflow.
//!
//! Every operation forwards the raw request to exactly one collaborator call
//! and returns the serialized [`OutputResponse`]. No error escapes: the
//! return type is a plain `String` on every path.

use tracing::{debug, error, warn};

use crate::auth::AuthToken;
use crate::envelope::{ErrorBody, OutputResponse, FAILURE, GENERIC_FAILURE};
use crate::error::{CareContextError, Result};
use crate::service::CareContextService;

/// Message placed in the error slot when no request body was supplied.
pub const EMPTY_REQUEST: &str = "Empty request object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    GenerateOtp,
    ValidateOtp,
    SaveToStore,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::GenerateOtp => "generate_otp",
            Operation::ValidateOtp => "validate_otp_and_create_care_context",
            Operation::SaveToStore => "save_care_context_to_store",
        }
    }
}

pub struct CareContextController<S> {
    service: S,
}

impl<S: CareContextService> CareContextController<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Ask the collaborator to send an OTP for linking a care context.
    pub async fn generate_otp(
        &self,
        request: Option<&str>,
        authorization: Option<&AuthToken>,
    ) -> String {
        self.dispatch(Operation::GenerateOtp, request, authorization).await
    }

    /// Validate the OTP and have the collaborator create the care context.
    pub async fn validate_otp_and_create_care_context(
        &self,
        request: Option<&str>,
        authorization: Option<&AuthToken>,
    ) -> String {
        self.dispatch(Operation::ValidateOtp, request, authorization).await
    }

    pub async fn save_care_context_to_store(
        &self,
        request: Option<&str>,
        authorization: Option<&AuthToken>,
    ) -> String {
        self.dispatch(Operation::SaveToStore, request, authorization).await
    }

    async fn dispatch(
        &self,
        op: Operation,
        request: Option<&str>,
        // Accepted for the binding's sake; the collaborator authenticates on its own.
        _authorization: Option<&AuthToken>,
    ) -> String {
        let Some(request) = request else {
            debug!(op = op.name(), "absent request, collaborator not called");
            return OutputResponse::failure(GENERIC_FAILURE, EMPTY_REQUEST, FAILURE).serialize();
        };
        debug!(op = op.name(), request_len = request.len(), "forwarding to collaborator");

        let envelope = match self.call(op, request).await {
            Ok(value) => OutputResponse::success(value),
            Err(err) => {
                match &err {
                    CareContextError::Domain { .. } => {
                        warn!(op = op.name(), %err, "collaborator rejected request")
                    }
                    CareContextError::Unknown(_) => {
                        error!(op = op.name(), %err, "collaborator failed")
                    }
                }
                OutputResponse::from_error(ErrorBody::from(err))
            }
        };
        envelope.serialize()
    }

    async fn call(&self, op: Operation, request: &str) -> Result<String> {
        match op {
            Operation::GenerateOtp => self.service.generate_otp_for_care_context(request).await,
            Operation::ValidateOtp => {
                self.service
                    .validate_otp_and_create_care_context(request)
                    .await
            }
            Operation::SaveToStore => self.service.save_care_context_to_store(request).await,
        }
    }
}
