//! Output envelope: the uniform shape every controller call returns.
//!
//! ```json
//! { "response": "<payload>" }
//! { "error": { "statusCode": 5000, "errorMessage": "...", "status": "FAILURE" } }
//! ```
//!
//! An envelope starts unset and is written once; the first write wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EnvelopeError;

pub const GENERIC_FAILURE: i32 = 5000;
pub const FAILURE: &str = "FAILURE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: i32,
    pub error_message: String,
    pub status: String,
}

/// The populated slot of an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Response(String),
    Error(ErrorBody),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeWire", into = "EnvelopeWire")]
pub struct OutputResponse {
    outcome: Option<Outcome>,
}

/// Serialized form: at most one key present, never a separate status field.
#[derive(Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvelopeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl OutputResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(value: impl Into<String>) -> Self {
        Self {
            outcome: Some(Outcome::Response(value.into())),
        }
    }

    pub fn failure(
        status_code: i32,
        message: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self::from_error(ErrorBody {
            status_code,
            error_message: message.into(),
            status: status.into(),
        })
    }

    pub fn from_error(body: ErrorBody) -> Self {
        Self {
            outcome: Some(Outcome::Error(body)),
        }
    }

    pub fn set_response(&mut self, value: impl Into<String>) -> Result<(), EnvelopeError> {
        self.write(Outcome::Response(value.into()))
    }

    pub fn set_error(
        &mut self,
        status_code: i32,
        message: impl Into<String>,
        status: impl Into<String>,
    ) -> Result<(), EnvelopeError> {
        self.write(Outcome::Error(ErrorBody {
            status_code,
            error_message: message.into(),
            status: status.into(),
        }))
    }

    fn write(&mut self, outcome: Outcome) -> Result<(), EnvelopeError> {
        match &self.outcome {
            Some(Outcome::Response(_)) => Err(EnvelopeError::AlreadySet("response")),
            Some(Outcome::Error(_)) => Err(EnvelopeError::AlreadySet("error")),
            None => {
                self.outcome = Some(outcome);
                Ok(())
            }
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn response(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Response(r)) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        match &self.outcome {
            Some(Outcome::Error(e)) => Some(e),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Response(_)))
    }

    /// Canonical JSON form; equal envelopes serialize to equal strings.
    pub fn serialize(&self) -> String {
        serde_json::to_string(&EnvelopeWire::from(self.clone())).unwrap_or_else(|_| "{}".into())
    }

    pub fn parse(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for OutputResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl From<OutputResponse> for EnvelopeWire {
    fn from(env: OutputResponse) -> Self {
        match env.outcome {
            Some(Outcome::Response(r)) => Self {
                response: Some(r),
                error: None,
            },
            Some(Outcome::Error(e)) => Self {
                response: None,
                error: Some(e),
            },
            None => Self::default(),
        }
    }
}

impl TryFrom<EnvelopeWire> for OutputResponse {
    type Error = String;

    fn try_from(wire: EnvelopeWire) -> Result<Self, Self::Error> {
        let outcome = match (wire.response, wire.error) {
            (Some(_), Some(_)) => return Err("envelope holds both response and error".into()),
            (Some(r), None) => Some(Outcome::Response(r)),
            (None, Some(e)) => Some(Outcome::Error(e)),
            (None, None) => None,
        };
        Ok(Self { outcome })
    }
}
