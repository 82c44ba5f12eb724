//! Core data models for the teacher search system.
//!
//! This module contains the instructor profile loaded from the data file and
//! the outcome types produced by the search pipeline.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, stable identifier of an instructor record.
///
/// The data file uses numeric ids, but string ids are accepted as well so the
/// file format can evolve without breaking the loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeacherId {
    /// Numeric identifier
    Number(i64),

    /// Textual identifier
    Text(String),
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeacherId::Number(n) => write!(f, "{}", n),
            TeacherId::Text(s) => f.write_str(s),
        }
    }
}

/// A single instructor profile.
///
/// Records are immutable once loaded. Missing text fields deserialize to empty
/// strings so that matching never has to special-case absent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique identifier
    pub id: TeacherId,

    /// Full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Academic degree, free text (e.g. "Dr. sc. ing.", "Mg. math.")
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,

    /// Position or title (e.g. "profesors", "lektors")
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,

    /// Department or institute
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,

    /// Names of taught courses, in catalogue order
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<String>,

    /// Research area description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// External profile page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl Teacher {
    /// A record with only an id and a name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: TeacherId::Number(id),
            name: name.into(),
            degree: String::new(),
            position: String::new(),
            department: String::new(),
            courses: Vec::new(),
            research: None,
            email: None,
            profile_url: None,
        }
    }

    /// Set the degree.
    pub fn with_degree(mut self, degree: impl Into<String>) -> Self {
        self.degree = degree.into();
        self
    }

    /// Set the position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Set the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Set the course list.
    pub fn with_courses<I, S>(mut self, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.courses = courses.into_iter().map(Into::into).collect();
        self
    }

    /// Set the research description.
    pub fn with_research(mut self, research: impl Into<String>) -> Self {
        self.research = Some(research.into());
        self
    }

    /// Set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Treats an explicit JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Why the local extractor was used instead of the AI completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum FallbackReason {
    /// No API credential was configured
    AiNotConfigured,

    /// The completion was empty after cleanup
    EmptyCompletion,

    /// The call failed (timeout, network, HTTP status, malformed body)
    CallFailed(String),
}

/// Where the keyword string of a search came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    /// Cleaned AI completion
    Ai,

    /// Local rule-based extractor
    Fallback(FallbackReason),

    /// Normalization was skipped (list-all path)
    Unfiltered,
}

impl KeywordSource {
    /// Short human-readable label used by the CLI and logs.
    pub fn label(&self) -> &'static str {
        match self {
            KeywordSource::Ai => "AI",
            KeywordSource::Fallback(_) => "local extractor",
            KeywordSource::Unfiltered => "unfiltered",
        }
    }
}

/// Result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The keyword string the records were filtered with
    pub keywords_used: String,

    /// Whether an AI credential is configured (not whether the call succeeded)
    pub ai_was_used: bool,

    /// How the keyword string was obtained
    pub keyword_source: KeywordSource,

    /// Matching records, most relevant first
    pub results: Vec<Teacher>,
}
