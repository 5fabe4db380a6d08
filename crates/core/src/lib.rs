//! GlowApp core capabilities and onboarding domain
//!
//! The request gateway in `glow-http` talks to the outside world through the
//! two capabilities defined here: a [`CredentialStore`] holding the persisted
//! bearer credential and a [`Notifier`] receiving user-facing messages.

pub mod credentials;
pub mod errors;
pub mod notify;
pub mod onboarding;
pub mod settings;
pub mod validation;

pub use credentials::{
    CredentialStore, DEFAULT_CREDENTIAL_KEY, FileCredentialStore, MemoryCredentialStore,
};
pub use errors::{Error, Result};
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use settings::GlowSettings;
pub use validation::{FieldError, Validate, ValidationErrors};
