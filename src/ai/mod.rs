//! Text-generation collaborator and AI-backed keyword normalization.
//!
//! This module defines the interface to a remote chat-completion service and
//! the [`KeywordNormalizer`] that turns free-text queries into keyword strings
//! with it. The abstraction lets the normalizer be exercised with scripted
//! generators in tests and lets the HTTP client be swapped without touching
//! the search pipeline.

pub mod normalizer;
pub mod openrouter;
pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use normalizer::{clean_completion, KeywordNormalizer, NormalizedQuery};

/// Errors that can occur while calling the text-generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The call did not complete within the configured bound
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status code
        status: u16,
        /// Error message from the body, or the status reason
        message: String,
    },

    /// The body could not be read as a completion
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for text-generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Parameters of one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system_prompt: String,

    /// The user turn, passed through verbatim
    pub user_query: String,

    /// Output token cap
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

/// Trait for chat-completion providers.
///
/// Implementations perform exactly one attempt per call. Retries, fallbacks
/// and timeouts beyond the transport's own are the caller's business.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the primary text completion for the request.
    ///
    /// # Errors
    /// Returns `GenerationError` on timeout, transport failure, non-2xx
    /// status or a body without a completion.
    async fn generate(&self, request: &CompletionRequest) -> GenerationResult<String>;

    /// Human-readable provider/model label for logs and status responses.
    fn name(&self) -> &str;
}
