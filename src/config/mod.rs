//! Runtime configuration.
//!
//! Configuration is an explicit value handed to the components that need it.
//! Binaries build it from command-line flags and environment variables; the
//! library never reads the environment itself.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Chat-completions endpoint of OpenRouter.
pub const DEFAULT_AI_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used for keyword normalization.
pub const DEFAULT_AI_MODEL: &str = "google/gemini-2.0-flash-exp:free";

/// Upper bound on a single normalization call.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(10);

/// Output token cap for the completion.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Low temperature keeps the keyword answers stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default location of the instructor data file.
pub const DEFAULT_DATA_PATH: &str = "teachers.json";

/// Errors raised while validating configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The AI timeout must be positive
    #[error("AI timeout must be greater than zero")]
    ZeroTimeout,

    /// Temperature outside the range accepted by chat-completion APIs
    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    /// Output token cap must be positive
    #[error("max_tokens must be greater than zero")]
    ZeroMaxTokens,

    /// Endpoint is not an http(s) URL
    #[error("Invalid AI endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the text-generation API.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    /// Bearer token
    pub api_key: String,

    /// Full chat-completions URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Bound on one call, including connect and body read
    pub timeout: Duration,

    /// Output token cap
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Value of the `HTTP-Referer` header
    pub referer: String,

    /// Value of the `X-Title` header
    pub title: String,
}

impl AiConfig {
    /// Default settings for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout: DEFAULT_AI_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            referer: "http://localhost:3000".to_string(),
            title: "LBTU Teacher Search AI".to_string(),
        }
    }

    /// `None` when the key is absent or blank, meaning "AI not configured".
    pub fn from_api_key(api_key: Option<String>) -> Option<Self> {
        api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    /// Override the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the settings for values the API would reject.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }
}

/// Application-level settings shared by both binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Instructor data file
    pub data_path: PathBuf,

    /// AI settings; `None` disables the AI normalizer
    pub ai: Option<AiConfig>,

    /// Load the data file once and serve from memory
    pub cache_records: bool,
}

impl AppConfig {
    /// Settings for a data file with AI disabled and no caching.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ai: None,
            cache_records: false,
        }
    }

    /// Whether an AI credential is present.
    pub fn ai_configured(&self) -> bool {
        self.ai.is_some()
    }

    /// Validate nested settings.
    pub fn validate(&self) -> ConfigResult<()> {
        match &self.ai {
            Some(ai) => ai.validate(),
            None => Ok(()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}
