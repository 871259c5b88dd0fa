//! Client configuration
//!
//! Defaults match a backend running locally. The terminal client layers, in
//! increasing priority: built-in defaults, an optional TOML file
//! (`docquery.toml`), a `.env` file, and `DOCQUERY_*` environment variables:
//!
//! ```toml
//! api_base = "http://localhost:8000"
//! signup_redirect_delay_ms = 1500
//! session_file = "/home/me/.config/docquery/token"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_SIGNUP_REDIRECT_DELAY_MS: u64 = 1500;
pub const DEFAULT_CONFIG_FILE: &str = "docquery.toml";
pub const ENV_PREFIX: &str = "DOCQUERY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the question-answering backend.
    pub api_base: String,
    /// Key the bearer token is stored under: the `localStorage` key in the
    /// browser, the token file's name natively.
    pub token_key: String,
    /// How long the sign-up confirmation stays up before going to sign-in.
    pub signup_redirect_delay_ms: u64,
    /// Where the terminal client keeps its token. `None` means the
    /// platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: crate::session::TOKEN_KEY.to_string(),
            signup_redirect_delay_ms: DEFAULT_SIGNUP_REDIRECT_DELAY_MS,
            session_file: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn signup_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.signup_redirect_delay_ms)
    }

    pub fn endpoint(&self, path: &str) -> String {
        crate::api::endpoint(&self.api_base, path)
    }

    /// Reject values that would only fail later, on the first request.
    pub fn validate(&self) -> crate::types::Result<()> {
        use crate::types::AppError;

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.token_key.trim().is_empty() {
            return Err(AppError::Config("token_key must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
impl ClientConfig {
    /// Load the layered configuration. A missing file is not an error.
    pub fn load(path: Option<&std::path::Path>) -> crate::types::Result<Self> {
        use crate::types::AppError;
        use config::{Config, Environment, File};

        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }

        let file = path
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Self = Config::builder()
            .add_source(File::from(file).required(path.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        tracing::debug!(api_base = %config.api_base, "Configuration loaded");
        Ok(config)
    }

    /// Token file to use: the configured one, or `<config dir>/docquery/token`.
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("docquery")
                .join(&self.token_key)
        })
    }

    pub fn to_toml(&self) -> crate::types::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::types::AppError::Config(e.to_string()))
    }
}
