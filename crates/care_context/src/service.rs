use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// The collaborator that owns OTP generation, validation and persistence.
///
/// Implementations receive the raw request body unchanged and must be safe
/// for concurrent use; the controller shares one instance across requests.
#[async_trait]
pub trait CareContextService: Send + Sync {
    async fn generate_otp_for_care_context(&self, request: &str) -> Result<String>;

    async fn validate_otp_and_create_care_context(&self, request: &str) -> Result<String>;

    async fn save_care_context_to_store(&self, request: &str) -> Result<String>;
}

#[async_trait]
impl<T: CareContextService + ?Sized> CareContextService for Arc<T> {
    async fn generate_otp_for_care_context(&self, request: &str) -> Result<String> {
        (**self).generate_otp_for_care_context(request).await
    }

    async fn validate_otp_and_create_care_context(&self, request: &str) -> Result<String> {
        (**self).validate_otp_and_create_care_context(request).await
    }

    async fn save_care_context_to_store(&self, request: &str) -> Result<String> {
        (**self).save_care_context_to_store(request).await
    }
}
