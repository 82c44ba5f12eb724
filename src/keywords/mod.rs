//! Local keyword extraction.
//!
//! The [`KeywordExtractor`] is the deterministic backstop of query
//! normalization. It is used directly when no AI is configured and as the
//! fallback whenever the AI call fails or answers with nothing.
//!
//! Extraction first walks an ordered decision list of substring triggers;
//! the first trigger found in the lowercased query returns its canonical
//! keyword string immediately. Only when no trigger fires does the extractor
//! fall back to plain tokenization with stop-word removal.

mod stopwords;

use std::sync::Arc;

pub use stopwords::Stopwords;

use crate::degree::DegreeTable;

/// Tokens of this many characters or fewer are dropped by tokenization.
const MIN_TOKEN_CHARS: usize = 2;

/// At most this many tokens survive generic tokenization.
const MAX_GENERIC_TOKENS: usize = 3;

/// Position and subject vocabulary, checked after the degree rules.
const VOCABULARY_TRIGGERS: &[(&str, &str)] = &[
    ("profesor", "profesors"),
    ("docen", "docents"),
    ("lektor", "lektors"),
    ("matemātik", "matemātika"),
    ("programmēšan", "programmēšana"),
    ("fizik", "fizika"),
    ("informātik", "informātika"),
];

/// One entry of the decision list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Any of these substrings of the lowercased query fires the trigger
    pub needles: Vec<&'static str>,

    /// Keyword string returned when the trigger fires
    pub output: &'static str,
}

impl Trigger {
    fn fires(&self, lowered_query: &str) -> bool {
        self.needles.iter().any(|needle| lowered_query.contains(needle))
    }
}

/// Rule-based query-to-keywords reduction.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    triggers: Vec<Trigger>,
    stopwords: Stopwords,
}

impl KeywordExtractor {
    /// Build the extractor from the shared degree table.
    ///
    /// Degree triggers come first, in table order, followed by the position
    /// and subject vocabulary.
    pub fn new(table: Arc<DegreeTable>) -> Self {
        let degree_triggers = table.rules().iter().map(|rule| Trigger {
            needles: rule.query_triggers.to_vec(),
            output: rule.canonical_keywords,
        });
        let vocabulary_triggers = VOCABULARY_TRIGGERS.iter().map(|(needle, output)| Trigger {
            needles: vec![*needle],
            output: *output,
        });

        Self {
            triggers: degree_triggers.chain(vocabulary_triggers).collect(),
            stopwords: Stopwords::new(),
        }
    }

    /// Replace the stop-word set.
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// The decision list in evaluation order.
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// Reduce a free-text query to a comma-separated keyword string.
    ///
    /// Never fails. Returns the query unchanged when nothing useful is left
    /// after tokenization.
    pub fn extract(&self, query: &str) -> String {
        let lowered = query.to_lowercase();

        if let Some(trigger) = self.triggers.iter().find(|t| t.fires(&lowered)) {
            return trigger.output.to_string();
        }

        let tokens: Vec<&str> = lowered
            .split_whitespace()
            .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
            .filter(|word| !self.stopwords.contains(word))
            .take(MAX_GENERIC_TOKENS)
            .collect();

        if tokens.is_empty() {
            query.to_string()
        } else {
            tokens.join(", ")
        }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DegreeTable::shared())
    }
}

/// Split a keyword string into lowercase, trimmed, non-empty tokens.
pub fn tokenize_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
