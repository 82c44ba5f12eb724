//! Stop-words for generic query tokenization.
//!
//! Command verbs, pronouns, auxiliaries and the generic nouns for "teacher"
//! that carry no filtering value in a directory query.

use std::collections::HashSet;

const QUERY_STOPWORDS: &[&str] = &[
    "atrod",
    "parādīt",
    "lūdzu",
    "visus",
    "vai",
    "kurš",
    "kāds",
    "kā",
    "kāpēc",
    "es",
    "tu",
    "mēs",
    "jūs",
    "viņš",
    "viņa",
    "gribu",
    "vēlos",
    "varu",
    "vari",
    "var",
    "ir",
    "bija",
    "būs",
    "man",
    "pasniedzējus",
    "pasniedzēji",
    "pasniedzēja",
];

/// A lowercase stop-word set.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// The built-in query stop-words.
    pub fn new() -> Self {
        Self::from_words(QUERY_STOPWORDS.iter().copied())
    }

    /// Build a set from arbitrary words; entries are lowercased.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            words: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Checks if an already-lowercased token is a stop-word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stop-words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_words() {
        let stopwords = Stopwords::new();
        assert!(stopwords.contains("atrod"));
        assert!(stopwords.contains("pasniedzēji"));
        assert!(!stopwords.contains("lektori"));
        assert_eq!(stopwords.len(), QUERY_STOPWORDS.len());
    }

    #[test]
    fn test_custom_words_are_lowercased() {
        let stopwords = Stopwords::from_words(["Lūdzu", "VISI"]);
        assert!(stopwords.contains("lūdzu"));
        assert!(stopwords.contains("visi"));
        assert!(!stopwords.is_empty());
    }
}
