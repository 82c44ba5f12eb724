//! Engine assembly from configuration.
//!
//! Both binaries build the same pipeline: one shared degree table, the
//! configured record source and, when a credential is present, the
//! OpenRouter client in front of the local extractor.

use std::sync::Arc;

use tracing::info;

use crate::ai::openrouter::OpenRouterClient;
use crate::ai::{GenerationResult, KeywordNormalizer};
use crate::config::AppConfig;
use crate::degree::DegreeTable;
use crate::keywords::KeywordExtractor;
use crate::query::KeywordSearchEngine;
use crate::storage::{DataSource, TeacherStorage};

/// The engine type the binaries run.
pub type AppEngine = KeywordSearchEngine<OpenRouterClient, DataSource>;

/// Build the engine described by `config` around `table`.
///
/// # Errors
/// Returns `GenerationError::ConfigError` if the HTTP client cannot be built.
pub async fn build_engine(config: &AppConfig, table: Arc<DegreeTable>) -> GenerationResult<AppEngine> {
    let extractor = KeywordExtractor::new(table.clone());

    let normalizer = match &config.ai {
        Some(ai) => {
            let client = OpenRouterClient::new(ai)?;
            info!(model = %ai.model, "AI keyword normalization enabled");
            KeywordNormalizer::with_ai(client, ai.clone(), extractor)
        }
        None => {
            info!("No API key configured, using local keyword extraction");
            KeywordNormalizer::local_only(extractor)
        }
    };

    let storage = DataSource::open(&config.data_path, config.cache_records).await;
    info!(source = storage.name(), "Record source ready");

    Ok(KeywordSearchEngine::new(normalizer, storage, table))
}
