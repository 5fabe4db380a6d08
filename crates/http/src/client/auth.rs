//! Authentication API client methods

use super::{ClientError, GlowClient};
use crate::types::{ApiRequest, ApiResponse, SignInData, SignUpData};
use glow_core::onboarding::{SignInForm, SignUpForm, VerifyOtpRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const SIGN_UP_PATH: &str = "/auth/sign-up";
pub const VERIFY_OTP_PATH: &str = "/auth/sign-up/verify-otp";

impl GlowClient {
    /// Create an account; the backend emails a one-time code
    pub async fn sign_up(&self, form: &SignUpForm) -> ApiResponse<SignUpData> {
        self.send_json(ApiRequest::post(SIGN_UP_PATH), form).await
    }

    /// Confirm the one-time code sent at sign-up
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> ApiResponse<JsonValue> {
        self.send_json(ApiRequest::post(VERIFY_OTP_PATH), request)
            .await
    }

    /// Sign in and persist the returned credential
    ///
    /// The request itself never carries a credential. The token is stored
    /// only when the envelope reports success and credential support is
    /// enabled.
    pub async fn sign_in(&self, form: &SignInForm) -> ApiResponse<SignInData> {
        let envelope: ApiResponse<SignInData> = self
            .send_json(ApiRequest::post(SIGN_IN_PATH).without_credential(), form)
            .await;

        if envelope.is_success()
            && let (Some(data), Some(credentials)) = (&envelope.data, &self.credentials)
        {
            match credentials.store.set(&credentials.key, &data.token).await {
                Ok(()) => info!(key = %credentials.key, "Stored credential after sign-in"),
                Err(e) => warn!(key = %credentials.key, "Failed to store credential: {e}"),
            }
        }

        envelope
    }

    /// Forget the stored credential
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Credential`] if the store cannot be updated
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        if let Some(credentials) = &self.credentials {
            credentials.store.remove(&credentials.key).await?;
            info!(key = %credentials.key, "Signed out");
        }
        Ok(())
    }

    async fn send_json<B, T>(&self, request: ApiRequest, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = request.path().to_string();
        match request.with_json(body) {
            Ok(request) => self.issue_request(&request).await,
            Err(e) => {
                warn!(path = %path, "Failed to serialize request body: {e}");
                ApiResponse::transport_failure()
            }
        }
    }
}
