//! Service configuration
//!
//! Loaded from environment variables (a `.env` file is honoured on native
//! targets). Both upstream API keys are required.

use std::time::Duration;

use super::search_url::DEFAULT_SEARCH_BASE;

pub const DEFAULT_RAPIDAPI_HOST: &str = "twitter154.p.rapidapi.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the outbound service clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub rapidapi_key: String,
    pub rapidapi_host: String,
    pub search_base_url: String,
    pub request_timeout: Duration,
    /// Expose error details to callers
    pub dev_mode: bool,
}

impl ServiceConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(not(target_arch = "wasm32"))]
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            rapidapi_key: required("RAPIDAPI_KEY")?,
            rapidapi_host: or_default("RAPIDAPI_HOST", DEFAULT_RAPIDAPI_HOST),
            search_base_url: or_default("SEARCH_BASE_URL", DEFAULT_SEARCH_BASE),
            request_timeout: Duration::from_secs(timeout_secs),
            dev_mode: lookup("NODE_ENV").as_deref() == Some("development"),
        })
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}
