use thiserror::Error;

use crate::envelope::{ErrorBody, FAILURE, GENERIC_FAILURE};

/// Failure raised by a [`CareContextService`](crate::CareContextService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CareContextError {
    /// Recognized failure carrying its own status code, message and tag.
    #[error("[{status_code}] {status}: {message}")]
    Domain {
        status_code: i32,
        message: String,
        status: String,
    },

    #[error("unexpected: {0}")]
    Unknown(String),
}

impl CareContextError {
    /// Domain error with the `FAILURE` tag.
    pub fn domain(status_code: i32, message: impl Into<String>) -> Self {
        Self::Domain {
            status_code,
            message: message.into(),
            status: FAILURE.into(),
        }
    }

    pub fn unknown(cause: impl Into<String>) -> Self {
        Self::Unknown(cause.into())
    }
}

impl From<CareContextError> for ErrorBody {
    fn from(err: CareContextError) -> Self {
        match err {
            CareContextError::Domain {
                status_code,
                message,
                status,
            } => ErrorBody {
                status_code,
                error_message: message,
                status,
            },
            CareContextError::Unknown(cause) => ErrorBody {
                status_code: GENERIC_FAILURE,
                error_message: cause,
                status: FAILURE.into(),
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("envelope already holds a {0} slot")]
    AlreadySet(&'static str),
}

pub type Result<T> = std::result::Result<T, CareContextError>;
