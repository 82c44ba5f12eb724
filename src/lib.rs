//! LBTU Teacher Search - natural-language search over an instructor directory.
//!
//! This library answers free-text Latvian questions such as "atrod man visus
//! maģistrus" with a ranked list of instructor profiles.
//!
//! # Architecture
//!
//! The system is organized into several key modules:
//!
//! - **models**: Core data structures (Teacher, SearchOutcome, KeywordSource)
//! - **degree**: The shared, versioned table of academic degree tokens
//! - **keywords**: Local rule-based keyword extraction and tokenization
//! - **ai**: Text-generation client (OpenRouter) and the keyword normalizer
//! - **storage**: Read-only record sources (JSON file, in-memory snapshot)
//! - **query**: Matching, scoring and the search pipeline
//! - **stats**: Degree and department aggregates
//! - **server**: Request routing and the line-delimited JSON transport
//! - **config**: Runtime configuration
//! - **app**: Engine assembly shared by the binaries
//!
//! # Workflow
//!
//! 1. Receive a query from the front end
//! 2. Normalize it into keywords (AI completion, or the local extractor)
//! 3. Split the keywords into lowercase tokens
//! 4. Load records and keep those matching every token
//! 5. Rank the matches by weighted field hits
//!
//! # Example
//!
//! ```ignore
//! use teacher_search::{
//!     ai::{openrouter::OpenRouterClient, KeywordNormalizer},
//!     config::AiConfig,
//!     degree::DegreeTable,
//!     keywords::KeywordExtractor,
//!     query::{KeywordSearchEngine, SearchEngine},
//!     storage::JsonFileStorage,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = DegreeTable::shared();
//!     let config = AiConfig::new(api_key);
//!     let client = OpenRouterClient::new(&config)?;
//!     let normalizer =
//!         KeywordNormalizer::with_ai(client, config, KeywordExtractor::new(table.clone()));
//!     let engine = KeywordSearchEngine::new(normalizer, JsonFileStorage::new("teachers.json"), table);
//!
//!     let outcome = engine.search("docenti ar doktora grādu").await?;
//!     for teacher in outcome.results {
//!         println!("{} ({})", teacher.name, teacher.degree);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Public modules
pub mod ai;
pub mod app;
pub mod config;
pub mod degree;
pub mod keywords;
pub mod models;
pub mod query;
pub mod server;
pub mod stats;
pub mod storage;

// Re-export commonly used types at the crate root
pub use ai::{KeywordNormalizer, TextGenerator};
pub use config::{AiConfig, AppConfig};
pub use degree::{DegreeLevel, DegreeTable};
pub use keywords::KeywordExtractor;
pub use models::{KeywordSource, SearchOutcome, Teacher, TeacherId};
pub use query::{KeywordSearchEngine, SearchEngine};
pub use storage::{DataSource, JsonFileStorage, MemoryStorage, TeacherStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
