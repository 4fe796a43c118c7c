//! Caller credential: the raw `Authorization` header, carried opaquely.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use care_context::AuthToken;

/// Axum extractor: the `Authorization` header if present and readable.
/// Never rejects; the gate does not authenticate callers.
#[derive(Debug, Clone, Default)]
pub struct CallerToken(pub Option<AuthToken>);

impl CallerToken {
    pub fn from_parts(parts: &Parts) -> Self {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(AuthToken::new);
        Self(token)
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.0.as_ref()
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CallerToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
