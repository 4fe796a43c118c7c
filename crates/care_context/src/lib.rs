//! Care-context OTP controller. Forwards the two-step OTP workflow to a
//! collaborator and answers every call with a serialized envelope.
//!
//! # Architecture
//!
//! ```text
//! HTTP binding (raw body + Authorization header)
//!   │
//!   ▼
//! CareContextController::generate_otp / validate_otp_and_create_care_context
//!   │
//!   ▼  (collaborator: OTP logic and persistence live here)
//! CareContextService
//!   │
//!   ▼
//! Result<String, CareContextError> ──► OutputResponse ──► String
//! ```
//!
//! Nothing raised by the collaborator crosses the controller: domain errors
//! land in the envelope's `error` slot 1:1, anything else lands there as a
//! generic failure.

pub mod auth;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod service;
pub mod types;
#[cfg(feature = "http")]
pub mod upstream;

pub use auth::AuthToken;
pub use controller::CareContextController;
pub use envelope::{ErrorBody, Outcome, OutputResponse};
pub use error::{CareContextError, EnvelopeError};
pub use service::CareContextService;
pub use types::{GenerateOtpRequest, ValidateOtpRequest};
