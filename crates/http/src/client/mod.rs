//! GlowApp HTTP client

pub mod auth;
pub mod error;

use crate::types::{ApiRequest, ApiResponse};
use error::ClientError;
use glow_core::settings::DEFAULT_BASE_URL;
use glow_core::{CredentialStore, DEFAULT_CREDENTIAL_KEY, GlowSettings, Notifier, TracingNotifier};
use reqwest::{Client, ClientBuilder, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the bearer credential lives
#[derive(Clone)]
struct Credentials {
    store: Arc<dyn CredentialStore>,
    key: String,
}

/// GlowApp API client
///
/// Cloning is cheap; clones share the connection pool, the credential store
/// and the notifier.
#[derive(Clone)]
pub struct GlowClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
    notifier: Arc<dyn Notifier>,
}

impl GlowClient {
    /// Create a client without credential support
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> GlowClientBuilder {
        GlowClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Key of the persisted credential, when credential support is enabled
    pub fn credential_key(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.key.as_str())
    }

    /// Issue one request and return the decoded envelope
    ///
    /// Never fails: transport, credential-store and decoding failures all
    /// yield [`ApiResponse::transport_failure`] without notifying. When
    /// credential support is enabled and the envelope carries status 401, the
    /// message is reported as an error and the stored credential is removed.
    /// Otherwise the envelope's message, if any, is reported once with the
    /// style of its first set flag (success, error, warning).
    ///
    /// A `data` payload that does not fit `T` is dropped; the rest of the
    /// envelope is still returned.
    pub async fn issue_request<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResponse<T> {
        let envelope = match self.execute(request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(
                    method = %request.method(),
                    path = request.path(),
                    kind = e.kind(),
                    "Request failed: {e}"
                );
                return ApiResponse::transport_failure();
            }
        };

        if let Some(credentials) = &self.credentials
            && envelope.is_unauthorized()
        {
            if let Some(message) = &envelope.message {
                self.notifier.error(message);
            }
            Self::evict_credential(credentials).await;
        } else if let Some(notification) = envelope.notification() {
            self.notifier.notify(&notification);
        }

        Self::typed(request, envelope)
    }

    /// Build, send and decode a request into the untyped envelope
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self
            .client
            .request(request.method().into(), url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.credential_for(request).await? {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(body) = request.body() {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        debug!(method = %request.method(), path = request.path(), "Sending request");
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "Received response");

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Convert the payload to `T`, keeping every other envelope field
    fn typed<T: DeserializeOwned>(request: &ApiRequest, envelope: ApiResponse) -> ApiResponse<T> {
        let ApiResponse {
            error,
            warning,
            success,
            message,
            data,
            status,
        } = envelope;

        let data = data.and_then(|value| match serde_json::from_value(value) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(
                    method = %request.method(),
                    path = request.path(),
                    "Dropping response data of unexpected shape: {e}"
                );
                None
            }
        });

        ApiResponse {
            error,
            warning,
            success,
            message,
            data,
            status,
        }
    }

    /// Read the stored credential unless the request opts out
    async fn credential_for(&self, request: &ApiRequest) -> Result<Option<String>, ClientError> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };
        if request.skips_credential() {
            return Ok(None);
        }
        let token = credentials.store.get(&credentials.key).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    async fn evict_credential(credentials: &Credentials) {
        match credentials.store.remove(&credentials.key).await {
            Ok(()) => info!(key = %credentials.key, "Removed credential after unauthorized response"),
            Err(e) => warn!(key = %credentials.key, "Failed to remove credential: {e}"),
        }
    }
}

/// Builder for GlowClient
#[derive(Default)]
pub struct GlowClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    credential_store: Option<Arc<dyn CredentialStore>>,
    credential_key: Option<String>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl GlowClientBuilder {
    /// Start from loaded settings
    pub fn from_settings(settings: &GlowSettings) -> Self {
        let mut builder = Self::default()
            .base_url(settings.base_url.clone())
            .credential_key(settings.credential_key.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Enable credential support backed by `store`
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Override the key the credential is stored under
    pub fn credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = Some(key.into());
        self
    }

    /// Set where user-facing messages go
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GlowClient, ClientError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is required".into()));
        }

        let credential_key = self
            .credential_key
            .unwrap_or_else(|| DEFAULT_CREDENTIAL_KEY.to_string());
        if credential_key.is_empty() {
            return Err(ClientError::Configuration(
                "credential_key must not be empty".into(),
            ));
        }

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(concat!("glow-client/", env!("CARGO_PKG_VERSION")));
        }

        let client = client_builder.build()?;

        Ok(GlowClient {
            client,
            base_url,
            credentials: self.credential_store.map(|store| Credentials {
                store,
                key: credential_key,
            }),
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
        })
    }
}
