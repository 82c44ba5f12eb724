//! Search pipeline.
//!
//! A query flows through four stages:
//!
//! 1. keyword normalization ([`KeywordNormalizer`]): AI completion or local
//!    extraction
//! 2. tokenization ([`tokenize_keywords`]): comma split, trim, lowercase
//! 3. filtering ([`Matcher`]): every keyword must match
//! 4. ranking ([`Scorer`]): stable sort by relevance, highest first
//!
//! # Usage
//!
//! ```rust,no_run
//! use teacher_search::ai::openrouter::OpenRouterClient;
//! use teacher_search::ai::KeywordNormalizer;
//! use teacher_search::degree::DegreeTable;
//! use teacher_search::keywords::KeywordExtractor;
//! use teacher_search::query::{KeywordSearchEngine, SearchEngine};
//! use teacher_search::storage::JsonFileStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table = DegreeTable::shared();
//! let normalizer: KeywordNormalizer<OpenRouterClient> =
//!     KeywordNormalizer::local_only(KeywordExtractor::new(table.clone()));
//! let engine = KeywordSearchEngine::new(normalizer, JsonFileStorage::new("teachers.json"), table);
//!
//! let outcome = engine.search("atrod man visus maģistrus").await?;
//! println!("{} -> {} results", outcome.keywords_used, outcome.results.len());
//! # Ok(())
//! # }
//! ```

pub mod matcher;
pub mod scorer;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::ai::{KeywordNormalizer, TextGenerator};
use crate::degree::DegreeTable;
use crate::keywords::tokenize_keywords;
use crate::models::{KeywordSource, SearchOutcome};
use crate::storage::{load_or_empty, TeacherStorage};

pub use matcher::Matcher;
pub use scorer::{ScoreWeights, Scorer};

/// Keyword string reported by the list-all path.
pub const LIST_ALL_SENTINEL: &str = "visi pasniedzēji";

/// Errors that can occur during query processing.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Missing or blank query text
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Other unexpected errors
    #[error("Unexpected query error: {0}")]
    Other(String),
}

impl From<tokio::task::JoinError> for QueryError {
    fn from(err: tokio::task::JoinError) -> Self {
        QueryError::Other(format!("ranking task failed: {}", err))
    }
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Trait for search engines.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Run the full pipeline for a free-text query.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidQuery` for a blank query; no records are
    /// loaded in that case.
    async fn search(&self, query: &str) -> QueryResult<SearchOutcome>;

    /// Every record in store order, without normalization or filtering.
    async fn list_all(&self) -> SearchOutcome;

    /// Whether an AI credential is configured.
    fn ai_configured(&self) -> bool;
}

/// Keyword filter-and-rank engine over a record store.
pub struct KeywordSearchEngine<G, S>
where
    G: TextGenerator,
    S: TeacherStorage,
{
    normalizer: KeywordNormalizer<G>,
    storage: S,
    matcher: Matcher,
    scorer: Scorer,
}

impl<G, S> KeywordSearchEngine<G, S>
where
    G: TextGenerator,
    S: TeacherStorage,
{
    /// Create an engine; `table` must be the one the normalizer's extractor
    /// was built from.
    pub fn new(normalizer: KeywordNormalizer<G>, storage: S, table: Arc<DegreeTable>) -> Self {
        Self {
            normalizer,
            storage,
            matcher: Matcher::new(table.clone()),
            scorer: Scorer::new(table),
        }
    }

    /// Replace the scorer, e.g. to tune weights.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn normalizer(&self) -> &KeywordNormalizer<G> {
        &self.normalizer
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<G, S> SearchEngine for KeywordSearchEngine<G, S>
where
    G: TextGenerator,
    S: TeacherStorage,
{
    async fn search(&self, query: &str) -> QueryResult<SearchOutcome> {
        if query.trim().is_empty() {
            return Err(QueryError::InvalidQuery("query is empty".to_string()));
        }

        let normalized = self.normalizer.normalize(query).await;
        let teachers = load_or_empty(&self.storage).await;
        let keywords = tokenize_keywords(&normalized.keywords);
        debug!(keywords = ?keywords, records = teachers.len(), "Filtering records");

        let results = if keywords.is_empty() {
            teachers
        } else {
            let matcher = self.matcher.clone();
            let scorer = self.scorer.clone();
            tokio::task::spawn_blocking(move || {
                let matched = matcher.filter(teachers, &keywords);
                scorer.rank(matched, &keywords)
            })
            .await?
        };

        info!(
            keywords = %normalized.keywords,
            source = normalized.source.label(),
            count = results.len(),
            "Search complete"
        );

        Ok(SearchOutcome {
            keywords_used: normalized.keywords,
            ai_was_used: self.normalizer.ai_configured(),
            keyword_source: normalized.source,
            results,
        })
    }

    async fn list_all(&self) -> SearchOutcome {
        let results = load_or_empty(&self.storage).await;
        SearchOutcome {
            keywords_used: LIST_ALL_SENTINEL.to_string(),
            ai_was_used: self.normalizer.ai_configured(),
            keyword_source: KeywordSource::Unfiltered,
            results,
        }
    }

    fn ai_configured(&self) -> bool {
        self.normalizer.ai_configured()
    }
}
