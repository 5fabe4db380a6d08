//! User-facing notifications
//!
//! The gateway reports server messages through a [`Notifier`]. Emission is
//! fire-and-forget: nothing is returned and nothing is awaited.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Notification sink with one entry point per style
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);

    /// Dispatch a notification to the method matching its level
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => self.success(&notification.message),
            NotificationLevel::Error => self.error(&notification.message),
            NotificationLevel::Warning => self.warning(&notification.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Notifier that reports messages as log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(level = %NotificationLevel::Success, "{message}");
    }

    fn error(&self, message: &str) {
        warn!(level = %NotificationLevel::Error, "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(level = %NotificationLevel::Warning, "{message}");
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub Notifier {}

        impl Notifier for Notifier {
            fn success(&self, message: &str);
            fn error(&self, message: &str);
            fn warning(&self, message: &str);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_dispatches_by_level() {
        let mut notifier = mock::MockNotifier::new();
        notifier.expect_warning().times(1).return_const(());

        notifier.notify(&Notification::new(
            NotificationLevel::Warning,
            "Horário indisponível",
        ));
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
        assert_eq!(NotificationLevel::Error.to_string(), "error");
    }
}
