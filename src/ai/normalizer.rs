//! AI-backed keyword normalization with a local fallback.
//!
//! [`KeywordNormalizer::normalize`] always resolves: it either returns the
//! cleaned AI completion or the local extractor's output. The single AI
//! attempt is isolated in [`KeywordNormalizer::try_generate`], which returns
//! an explicit result so the fallback decision stays visible and testable.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::prompt::keyword_request;
use super::{GenerationError, GenerationResult, TextGenerator};
use crate::config::AiConfig;
use crate::keywords::KeywordExtractor;
use crate::models::{FallbackReason, KeywordSource};

/// Keyword string produced for a query, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Comma-separated keyword phrases
    pub keywords: String,

    /// Whether the AI or the fallback produced them
    pub source: KeywordSource,
}

struct AiBackend<G> {
    generator: G,
    config: AiConfig,
}

/// Turns free-text queries into keyword strings.
pub struct KeywordNormalizer<G: TextGenerator> {
    backend: Option<AiBackend<G>>,
    extractor: KeywordExtractor,
}

impl<G: TextGenerator> KeywordNormalizer<G> {
    /// Normalizer that calls `generator` with the given settings.
    pub fn with_ai(generator: G, config: AiConfig, extractor: KeywordExtractor) -> Self {
        Self {
            backend: Some(AiBackend { generator, config }),
            extractor,
        }
    }

    /// Normalizer that only uses the local extractor.
    pub fn local_only(extractor: KeywordExtractor) -> Self {
        Self {
            backend: None,
            extractor,
        }
    }

    /// Whether an AI credential was configured.
    pub fn ai_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Label of the configured generator, if any.
    pub fn generator_name(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.generator.name())
    }

    /// The fallback extractor.
    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Normalize a query. Never fails.
    pub async fn normalize(&self, query: &str) -> NormalizedQuery {
        let Some(backend) = &self.backend else {
            info!("AI not available, using local keyword extraction");
            return self.fallback(query, FallbackReason::AiNotConfigured);
        };

        info!(query = %query, "Normalizing query with AI");
        match self.try_generate(backend, query).await {
            Ok(raw) => {
                let cleaned = clean_completion(&raw);
                if cleaned.is_empty() {
                    debug!(raw = %raw, "AI completion empty after cleanup");
                    return self.fallback(query, FallbackReason::EmptyCompletion);
                }
                info!(keywords = %cleaned, "AI keywords");
                NormalizedQuery {
                    keywords: cleaned,
                    source: KeywordSource::Ai,
                }
            }
            Err(e) => {
                warn!(error = %e, "AI keyword normalization failed");
                self.fallback(query, FallbackReason::CallFailed(e.to_string()))
            }
        }
    }

    /// One bounded attempt at the AI completion.
    ///
    /// The timeout here applies even when the generator has none of its own.
    async fn try_generate(&self, backend: &AiBackend<G>, query: &str) -> GenerationResult<String> {
        let request = keyword_request(&backend.config, query);
        let bound: Duration = backend.config.timeout;

        match tokio::time::timeout(bound, backend.generator.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(bound)),
        }
    }

    fn fallback(&self, query: &str, reason: FallbackReason) -> NormalizedQuery {
        NormalizedQuery {
            keywords: self.extractor.extract(query),
            source: KeywordSource::Fallback(reason),
        }
    }
}

/// Clean a raw completion into a keyword string.
///
/// Strips one leading and one trailing quote character, then one trailing
/// period, turns newlines into `", "`, collapses comma runs and trims.
pub fn clean_completion(raw: &str) -> String {
    let mut text = raw;
    if let Some(rest) = text.strip_prefix(['"', '\'']) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(['"', '\'']) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix('.') {
        text = rest;
    }

    let joined = text.replace('\n', ", ");

    let mut collapsed = String::with_capacity(joined.len());
    let mut previous_comma = false;
    for ch in joined.chars() {
        if ch == ',' {
            if previous_comma {
                continue;
            }
            previous_comma = true;
        } else {
            previous_comma = false;
        }
        collapsed.push(ch);
    }

    collapsed.trim().to_string()
}
