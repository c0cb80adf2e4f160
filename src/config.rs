//! Application configuration.
//!
//! One explicit [`AppConfig`] value is built at startup and passed into the
//! layers that need it. The token budgeter takes no configuration at all.

use crate::{Error, Result};
use std::env;
use url::Url;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the completion endpoint. `None` keeps the offline
    /// commands (count/truncate/extract) usable; client construction fails
    /// without it.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Default sampling temperature for the structured-prompt flow.
    pub temperature: f32,
    /// Default output-token budget for the structured-prompt flow.
    pub max_output_tokens: u32,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_output_tokens: 1000,
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment.
    ///
    /// Unset variables take defaults; unparsable numeric values also fall
    /// back to defaults rather than failing startup. Only a malformed base
    /// URL is rejected here, since every later request would fail with a
    /// worse message.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url);
        Url::parse(&base_url).map_err(|e| {
            Error::configuration(format!("invalid OPENAI_BASE_URL {base_url:?}: {e}"))
        })?;

        Ok(Self {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            base_url,
            temperature: env_parse("OPENAI_TEMPERATURE", defaults.temperature),
            max_output_tokens: env_parse("OPENAI_MAX_TOKENS", defaults.max_output_tokens),
            http_timeout_secs: env_parse("PROMPTDOC_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
