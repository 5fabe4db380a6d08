//! Client error types

use thiserror::Error;

/// Client error types
///
/// Inside the gateway these are logged and folded into the transport-failure
/// envelope. They surface only from the builder and from sign-out.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential store failed
    #[error("Credential store error: {0}")]
    Credential(#[from] glow_core::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "transport",
            Self::Serialization(_) => "decode",
            Self::Credential(_) => "credential",
            Self::Configuration(_) => "configuration",
        }
    }
}
