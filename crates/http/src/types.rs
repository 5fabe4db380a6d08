//! Request descriptors and response envelopes

use glow_core::{Notification, NotificationLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Message of the envelope synthesized when no response could be decoded
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Ocorreu um erro ao tentar acessar a API";

/// Status value the backend uses to signal an invalid or expired credential
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// HTTP verbs accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported method '{other}'")),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Description of a single API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    path: String,
    method: Method,
    body: Option<JsonValue>,
    skip_credential: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            skip_credential: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach any serializable value as the JSON body
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `body` cannot be represented as JSON
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    /// Do not send the stored credential with this request
    #[must_use]
    pub fn without_credential(mut self) -> Self {
        self.skip_credential = true;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn method(&self) -> Method {
        self.method
    }

    pub const fn body(&self) -> Option<&JsonValue> {
        self.body.as_ref()
    }

    pub const fn skips_credential(&self) -> bool {
        self.skip_credential
    }
}

/// Envelope every backend response is wrapped in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = JsonValue> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            error: None,
            warning: None,
            success: None,
            message: None,
            data: None,
            status: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Envelope returned when the request could not be completed
    pub fn transport_failure() -> Self {
        Self {
            error: Some(true),
            message: Some(TRANSPORT_FAILURE_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    pub fn is_error(&self) -> bool {
        self.error == Some(true)
    }

    pub fn is_warning(&self) -> bool {
        self.warning == Some(true)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(UNAUTHORIZED_STATUS)
    }

    /// The notification this envelope calls for, if any
    ///
    /// Only envelopes carrying a message notify. The first set flag wins, in
    /// the order success, error, warning.
    pub fn notification(&self) -> Option<Notification> {
        let message = self.message.as_deref()?;
        let level = if self.is_success() {
            NotificationLevel::Success
        } else if self.is_error() {
            NotificationLevel::Error
        } else if self.is_warning() {
            NotificationLevel::Warning
        } else {
            return None;
        };
        Some(Notification::new(level, message))
    }
}

/// Payload of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInData {
    pub token: String,
}

/// Payload of a successful sign-up: where the OTP was sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpData {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transport_failure_has_only_error_and_message() {
        let envelope: ApiResponse = ApiResponse::transport_failure();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "error": true, "message": TRANSPORT_FAILURE_MESSAGE })
        );
    }

    #[test]
    fn envelope_decodes_partial_objects() {
        let envelope: ApiResponse<SignUpData> = serde_json::from_value(json!({
            "success": true,
            "message": "Código enviado",
            "data": { "email": "ana@glowapp.com.br" }
        }))
        .unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.status, None);
        assert_eq!(envelope.data.unwrap().email, "ana@glowapp.com.br");

        let empty: ApiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ApiResponse::default());
    }

    #[test]
    fn notification_priority() {
        let mut envelope: ApiResponse = ApiResponse {
            success: Some(true),
            error: Some(true),
            warning: Some(true),
            message: Some("ok".to_string()),
            ..ApiResponse::default()
        };
        assert_eq!(
            envelope.notification().map(|n| n.level),
            Some(NotificationLevel::Success)
        );

        envelope.success = Some(false);
        assert_eq!(
            envelope.notification().map(|n| n.level),
            Some(NotificationLevel::Error)
        );

        envelope.error = None;
        assert_eq!(
            envelope.notification().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );

        envelope.warning = None;
        assert_eq!(envelope.notification(), None);
    }

    #[test]
    fn no_message_means_no_notification() {
        let envelope: ApiResponse = ApiResponse {
            success: Some(true),
            ..ApiResponse::default()
        };
        assert_eq!(envelope.notification(), None);
    }

    #[test]
    fn request_builders() {
        let request = ApiRequest::post("/auth/sign-up")
            .with_json(&json!({ "email": "ana@glowapp.com.br" }))
            .unwrap()
            .without_credential();
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/auth/sign-up");
        assert!(request.skips_credential());
        assert_eq!(request.body(), Some(&json!({ "email": "ana@glowapp.com.br" })));

        assert_eq!(ApiRequest::get("/me").body(), None);
    }

    #[test]
    fn method_parsing_is_limited_to_four_verbs() {
        assert_eq!("delete".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
