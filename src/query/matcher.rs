//! Per-record keyword matching.

use std::sync::Arc;

use crate::degree::DegreeTable;
use crate::models::Teacher;

/// Lowercased concatenation of a record's searchable fields.
pub fn search_blob(teacher: &Teacher) -> String {
    let fields = [
        teacher.name.as_str(),
        teacher.degree.as_str(),
        teacher.position.as_str(),
        teacher.department.as_str(),
        teacher.research.as_deref().unwrap_or(""),
        &teacher.courses.join(" "),
        teacher.email.as_deref().unwrap_or(""),
    ];
    fields.join("\n").to_lowercase()
}

/// Decides whether records satisfy a keyword set.
///
/// Keywords are conjunctive: a record matches only when every keyword does.
#[derive(Debug, Clone)]
pub struct Matcher {
    table: Arc<DegreeTable>,
}

impl Matcher {
    /// Create a matcher over the shared degree table.
    pub fn new(table: Arc<DegreeTable>) -> Self {
        Self { table }
    }

    /// Whether `teacher` satisfies every keyword.
    pub fn matches(&self, teacher: &Teacher, keywords: &[String]) -> bool {
        let blob = search_blob(teacher);
        keywords
            .iter()
            .all(|keyword| self.keyword_matches(teacher, &blob, keyword))
    }

    fn keyword_matches(&self, teacher: &Teacher, blob: &str, keyword: &str) -> bool {
        if keyword.is_empty() {
            return true;
        }
        let keyword = keyword.to_lowercase();

        // Degree aliases are answered by the degree field alone.
        if let Some(rule) = self.table.rule_for_keyword(&keyword) {
            return rule.matches_degree(&teacher.degree);
        }

        if blob.contains(&keyword) {
            return true;
        }

        let mut parts = keyword.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(first), Some(second)) => {
                blob.contains(first)
                    || blob.contains(second)
                    || parts.any(|part| blob.contains(part))
            }
            _ => false,
        }
    }

    /// Keep the records that satisfy every keyword, preserving order.
    ///
    /// An empty keyword set keeps everything.
    pub fn filter(&self, teachers: Vec<Teacher>, keywords: &[String]) -> Vec<Teacher> {
        if keywords.is_empty() {
            return teachers;
        }
        teachers
            .into_iter()
            .filter(|teacher| self.matches(teacher, keywords))
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DegreeTable::shared())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    fn doctor() -> Teacher {
        Teacher::new(1, "Jānis Kalniņš")
            .with_degree("Dr. sc. ing.")
            .with_position("profesors")
            .with_department("Datoru sistēmu institūts")
            .with_courses(["Programmēšana I", "Datu struktūras"])
            .with_research("Mākslīgais intelekts")
            .with_email("janis.kalnins@lbtu.lv")
    }

    fn master() -> Teacher {
        Teacher::new(2, "Ilze Ozola")
            .with_degree("Mg. sc. ing.")
            .with_position("lektore")
            .with_department("Matemātikas institūts")
            .with_courses(["Matemātiskā analīze"])
    }

    #[test]
    fn test_search_blob_is_lowercase_and_complete() {
        let blob = search_blob(&doctor());
        assert!(blob.contains("jānis kalniņš"));
        assert!(blob.contains("dr. sc. ing."));
        assert!(blob.contains("programmēšana i datu struktūras"));
        assert!(blob.contains("mākslīgais intelekts"));
        assert!(blob.contains("janis.kalnins@lbtu.lv"));
    }

    #[test]
    fn test_doctorate_aliases_are_equivalent() {
        let matcher = Matcher::default();
        for keyword in ["dr", "dr.", "phd", "doktors"] {
            assert!(matcher.matches(&doctor(), &keywords(&[keyword])), "{}", keyword);
            assert!(!matcher.matches(&master(), &keywords(&[keyword])), "{}", keyword);
        }
    }

    #[test]
    fn test_master_alias_needs_literal_marker() {
        let matcher = Matcher::default();
        assert!(matcher.matches(&master(), &keywords(&["mg."])));
        assert!(matcher.matches(&master(), &keywords(&["maģistrs"])));
        assert!(!matcher.matches(&doctor(), &keywords(&["mg"])));

        let lowercase_degree = master().with_degree("mg. sc. ing.");
        assert!(!matcher.matches(&lowercase_degree, &keywords(&["mg"])));
    }

    #[test]
    fn test_doktors_is_case_insensitive_in_degree() {
        let matcher = Matcher::default();
        let teacher = master().with_degree("Zinātņu DOKTORS");
        assert!(matcher.matches(&teacher, &keywords(&["dr"])));
    }

    #[test]
    fn test_bachelor_alias() {
        let matcher = Matcher::default();
        let bachelor = master().with_degree("Bc. sc. comp.");
        assert!(matcher.matches(&bachelor, &keywords(&["bakalaurs"])));
        assert!(!matcher.matches(&master(), &keywords(&["bc"])));
    }

    #[test]
    fn test_keywords_are_conjunctive() {
        let matcher = Matcher::default();
        assert!(matcher.matches(&doctor(), &keywords(&["profesors", "programmēšana"])));
        assert!(!matcher.matches(&doctor(), &keywords(&["profesors", "matemātika"])));
    }

    #[test]
    fn test_multi_word_partial_match() {
        let matcher = Matcher::default();
        assert!(matcher.matches(&doctor(), &keywords(&["datoru tīkli"])));
        assert!(!matcher.matches(&master(), &keywords(&["datoru tīkli"])));
        assert!(matcher.matches(&master(), &keywords(&["augstākā matemātiskā"])));
    }

    #[test]
    fn test_keyword_is_lowercased() {
        let matcher = Matcher::default();
        assert!(matcher.matches(&doctor(), &keywords(&["PROFESORS"])));
        assert!(matcher.matches(&doctor(), &keywords(&["PhD"])));
    }

    #[test]
    fn test_empty_keyword_matches() {
        let matcher = Matcher::default();
        assert!(matcher.matches(&master(), &keywords(&[""])));
    }

    #[test]
    fn test_filter_keeps_order_and_empty_set_is_identity() {
        let matcher = Matcher::default();
        let teachers = vec![doctor(), master()];

        assert_eq!(matcher.filter(teachers.clone(), &[]), teachers);

        let filtered = matcher.filter(teachers.clone(), &keywords(&["institūts"]));
        assert_eq!(filtered, teachers);

        let filtered = matcher.filter(teachers, &keywords(&["mg."]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ilze Ozola");
    }
}
