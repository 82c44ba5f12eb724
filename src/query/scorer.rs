//! Relevance scoring for matched records.

use std::sync::Arc;

use crate::degree::DegreeTable;
use crate::models::Teacher;

/// Points awarded per field containing a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub name: u32,
    pub degree: u32,
    pub position: u32,
    pub department: u32,
    /// Added once when any course contains the keyword
    pub course: u32,
    /// Degree alias whose literal abbreviation appears in the degree field
    pub degree_bonus: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: 20,
            degree: 15,
            position: 12,
            department: 10,
            course: 8,
            degree_bonus: 25,
        }
    }
}

/// Computes a non-negative relevance score for a record.
#[derive(Debug, Clone)]
pub struct Scorer {
    table: Arc<DegreeTable>,
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(table: Arc<DegreeTable>) -> Self {
        Self {
            table,
            weights: ScoreWeights::default(),
        }
    }

    /// Override the field weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Sum of field hits over all keywords.
    ///
    /// Keywords are expected lowercased; empty keywords score nothing.
    pub fn score(&self, teacher: &Teacher, keywords: &[String]) -> u32 {
        let w = &self.weights;
        let name = teacher.name.to_lowercase();
        let degree = teacher.degree.to_lowercase();
        let position = teacher.position.to_lowercase();
        let department = teacher.department.to_lowercase();
        let courses: Vec<String> = teacher.courses.iter().map(|c| c.to_lowercase()).collect();

        let mut score = 0u32;
        for keyword in keywords.iter().filter(|k| !k.is_empty()) {
            if name.contains(keyword.as_str()) {
                score += w.name;
            }
            if degree.contains(keyword.as_str()) {
                score += w.degree;
            }
            if position.contains(keyword.as_str()) {
                score += w.position;
            }
            if department.contains(keyword.as_str()) {
                score += w.department;
            }
            if courses.iter().any(|course| course.contains(keyword.as_str())) {
                score += w.course;
            }

            if let Some(rule) = self.table.rule_for_keyword(keyword) {
                if rule.grants_bonus(keyword) && rule.has_marker(&teacher.degree) {
                    score += w.degree_bonus;
                }
            }
        }
        score
    }

    /// Stable descending sort by score; equal scores keep their input order.
    pub fn rank(&self, teachers: Vec<Teacher>, keywords: &[String]) -> Vec<Teacher> {
        let mut scored: Vec<(u32, Teacher)> = teachers
            .into_iter()
            .map(|teacher| (self.score(&teacher, keywords), teacher))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, teacher)| teacher).collect()
    }
}

impl Default for Scorer {
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

    #[test]
    fn test_field_weights() {
        let scorer = Scorer::default();
        let teacher = Teacher::new(1, "Anna Fizika")
            .with_degree("Dr. phys.")
            .with_position("fizikas docente")
            .with_department("Fizikas institūts")
            .with_courses(["Fizika I", "Fizika II", "Ķīmija"]);

        // name 20 + position 12 + department 10 + course 8
        assert_eq!(scorer.score(&teacher, &keywords(&["fizik"])), 50);
    }

    #[test]
    fn test_course_weight_counts_once_per_keyword() {
        let scorer = Scorer::default();
        let by_name = Teacher::new(1, "Fizika Anna");
        let by_courses =
            Teacher::new(2, "Bērziņa").with_courses(["Fizika I", "Fizika II", "Fizika III"]);
        let kw = keywords(&["fizika"]);

        assert_eq!(scorer.score(&by_name, &kw), 20);
        assert_eq!(scorer.score(&by_courses, &kw), 8);

        let ranked = scorer.rank(vec![by_courses, by_name], &kw);
        assert_eq!(ranked[0].name, "Fizika Anna");
    }

    #[test]
    fn test_degree_bonus_for_abbreviation() {
        let scorer = Scorer::default();
        let doctor = Teacher::new(1, "A").with_degree("Dr. sc. ing.");

        // degree field 15 + bonus 25
        assert_eq!(scorer.score(&doctor, &keywords(&["dr."])), 40);
        // spelled-out alias gets no bonus
        assert_eq!(scorer.score(&doctor, &keywords(&["doktors"])), 0);
    }

    #[test]
    fn test_bonus_needs_literal_marker() {
        let scorer = Scorer::default();
        let folded = Teacher::new(1, "A").with_degree("mg. sc.");
        assert_eq!(scorer.score(&folded, &keywords(&["mg"])), 15);
    }

    #[test]
    fn test_bachelor_has_no_bonus() {
        let scorer = Scorer::default();
        let bachelor = Teacher::new(1, "A").with_degree("Bc. sc. comp.");
        assert_eq!(scorer.score(&bachelor, &keywords(&["bc."])), 15);
    }

    #[test]
    fn test_empty_keywords_score_zero() {
        let scorer = Scorer::default();
        let teacher = Teacher::new(1, "Anna").with_position("lektore");
        assert_eq!(scorer.score(&teacher, &[]), 0);
        assert_eq!(scorer.score(&teacher, &keywords(&[""])), 0);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = Scorer::default().with_weights(ScoreWeights {
            name: 1,
            ..ScoreWeights::default()
        });
        let teacher = Teacher::new(1, "Anna");
        assert_eq!(scorer.score(&teacher, &keywords(&["anna"])), 1);
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let scorer = Scorer::default();
        let teachers = vec![
            Teacher::new(1, "Pirmais").with_position("lektors"),
            Teacher::new(2, "Otrais").with_position("lektors").with_courses(["lektoru skola"]),
            Teacher::new(3, "Trešais").with_position("lektors"),
        ];

        let ranked = scorer.rank(teachers, &keywords(&["lektor"]));
        let names: Vec<_> = ranked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Otrais", "Pirmais", "Trešais"]);
    }
}
