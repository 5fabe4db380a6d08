//! Client settings
//!
//! Settings are layered: built-in defaults, then an optional file, then
//! `GLOW_`-prefixed environment variables (`GLOW_BASE_URL`,
//! `GLOW_CREDENTIAL_KEY`, `GLOW_TIMEOUT_SECS`, `GLOW_DATA_DIR`).

use crate::{DEFAULT_CREDENTIAL_KEY, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Base endpoint of the GlowApp REST API
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlowSettings {
    /// Base URL that request paths are appended to
    pub base_url: String,

    /// Key of the persisted bearer credential
    pub credential_key: String,

    /// Optional transport timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory for preferences and logs
    pub data_dir: PathBuf,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            timeout_secs: None,
            data_dir: default_data_dir(),
        }
    }
}

/// Data directory, honouring `GLOW_STATE_DIR`
pub fn default_data_dir() -> PathBuf {
    std::env::var("GLOW_STATE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("glow")
        })
}

impl GlowSettings {
    /// Load settings from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self> {
        Self::load(None::<&Path>)
    }

    /// Load settings from a file layered over defaults, then environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the values are invalid
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("credential_key", defaults.credential_key)?
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }

        let settings: Self = builder
            .add_source(
                config::Environment::with_prefix("GLOW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the base URL is an absolute http(s) URL and the key is set
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            config_error(format!("base_url '{}' is not a valid URL: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(config_error(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.credential_key.trim().is_empty() {
            return Err(config_error("credential_key must not be empty".to_string()));
        }
        Ok(())
    }
}

fn config_error(message: String) -> Error {
    Error::ConfigError(config::ConfigError::Message(message))
}
