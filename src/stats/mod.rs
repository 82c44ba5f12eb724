//! Directory statistics.
//!
//! Aggregates used by the `stats` and `health` routes and by the server's
//! startup summary. Degree counts go through the shared [`DegreeTable`]
//! markers so they agree with what the matcher considers a master or doctor.

use std::collections::HashMap;

use serde::Serialize;

use crate::degree::{DegreeLevel, DegreeTable};
use crate::models::Teacher;

/// Label for records without a department.
pub const UNSPECIFIED_DEPARTMENT: &str = "Nav norādīts";

/// Number of departments reported by [`department_counts`] callers.
pub const TOP_DEPARTMENTS: usize = 10;

/// Record counts per degree level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DegreeBreakdown {
    pub total: usize,
    pub masters: usize,
    pub doctors: usize,
    pub bachelors: usize,
    /// Records not counted above; never negative
    pub other: usize,
}

impl DegreeBreakdown {
    /// Count records by the literal degree abbreviations.
    ///
    /// A record carrying several abbreviations is counted once per level, so
    /// `other` saturates at zero instead of going negative.
    pub fn compute(teachers: &[Teacher], table: &DegreeTable) -> Self {
        let count = |level: DegreeLevel| match table.rule(level) {
            Some(rule) => teachers.iter().filter(|t| rule.has_marker(&t.degree)).count(),
            None => 0,
        };

        let total = teachers.len();
        let masters = count(DegreeLevel::Master);
        let doctors = count(DegreeLevel::Doctorate);
        let bachelors = count(DegreeLevel::Bachelor);

        Self {
            total,
            masters,
            doctors,
            bachelors,
            other: total.saturating_sub(masters + doctors + bachelors),
        }
    }
}

/// Department name and its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

fn department_label(teacher: &Teacher) -> &str {
    let department = teacher.department.trim();
    if department.is_empty() {
        UNSPECIFIED_DEPARTMENT
    } else {
        department
    }
}

/// Departments by record count, largest first, at most `limit` entries.
///
/// Ties keep the order in which departments first appear.
pub fn department_counts(teachers: &[Teacher], limit: usize) -> Vec<DepartmentCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<DepartmentCount> = Vec::new();

    for teacher in teachers {
        let label = department_label(teacher);
        match index.get(label).copied() {
            Some(slot) => counts[slot].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(DepartmentCount {
                    department: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Distinct non-blank departments in first-seen order.
pub fn distinct_departments(teachers: &[Teacher]) -> Vec<String> {
    let mut seen = Vec::new();
    for teacher in teachers {
        let department = teacher.department.trim();
        if !department.is_empty() && !seen.iter().any(|d: &String| d == department) {
            seen.push(department.to_string());
        }
    }
    seen
}
