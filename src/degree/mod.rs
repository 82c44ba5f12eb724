//! Canonical academic degree tokens.
//!
//! The degree table is the single source of truth for how degree levels are
//! recognised. The keyword extractor uses it to turn degree questions into
//! canonical keywords, the matcher uses it to decide whether a record holds a
//! degree, the scorer uses it for the degree bonus and the statistics module
//! uses it to count records per level. All of them receive the same table, so
//! the four can never disagree about what "Mg." means.

use std::sync::Arc;

/// Academic degree levels known to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeLevel {
    /// Master's degree ("Mg.")
    Master,

    /// Doctorate ("Dr.", "PhD")
    Doctorate,

    /// Bachelor's degree ("Bc.")
    Bachelor,
}

/// Recognition rules for one degree level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeRule {
    /// The level this rule identifies
    pub level: DegreeLevel,

    /// Lowercase keyword forms that are answered by the degree field alone
    pub keyword_aliases: &'static [&'static str],

    /// Keyword forms that earn the scoring bonus
    pub bonus_aliases: &'static [&'static str],

    /// Case-sensitive substrings of the degree field
    pub markers: &'static [&'static str],

    /// Substrings matched against the lowercased degree field
    pub folded_markers: &'static [&'static str],

    /// Substrings of a lowercased query that select this level
    pub query_triggers: &'static [&'static str],

    /// Keyword string the extractor emits when a trigger fires
    pub canonical_keywords: &'static str,
}

impl DegreeRule {
    /// Whether `keyword` (already lowercased) is one of this level's aliases.
    pub fn is_alias(&self, keyword: &str) -> bool {
        self.keyword_aliases.iter().any(|alias| *alias == keyword)
    }

    /// Whether `keyword` (already lowercased) earns the scoring bonus.
    pub fn grants_bonus(&self, keyword: &str) -> bool {
        self.bonus_aliases.iter().any(|alias| *alias == keyword)
    }

    /// Whether the degree field carries one of the literal abbreviations.
    pub fn has_marker(&self, degree: &str) -> bool {
        self.markers.iter().any(|marker| degree.contains(marker))
    }

    /// Full match: literal abbreviations plus the case-insensitive aliases.
    pub fn matches_degree(&self, degree: &str) -> bool {
        if degree.is_empty() {
            return false;
        }
        if self.has_marker(degree) {
            return true;
        }
        if self.folded_markers.is_empty() {
            return false;
        }
        let folded = degree.to_lowercase();
        self.folded_markers.iter().any(|marker| folded.contains(marker))
    }
}

/// Current revision of the built-in rules.
pub const DEGREE_TABLE_VERSION: u32 = 1;

const MASTER: DegreeRule = DegreeRule {
    level: DegreeLevel::Master,
    keyword_aliases: &["mg.", "mg", "maģistrs"],
    bonus_aliases: &["mg.", "mg"],
    markers: &["Mg."],
    folded_markers: &[],
    query_triggers: &["maģistr", "magistr"],
    canonical_keywords: "Mg., maģistrs",
};

const DOCTORATE: DegreeRule = DegreeRule {
    level: DegreeLevel::Doctorate,
    keyword_aliases: &["dr.", "dr", "doktors", "phd"],
    bonus_aliases: &["dr.", "dr", "phd"],
    markers: &["Dr.", "PhD"],
    folded_markers: &["doktors"],
    query_triggers: &["doktor", "dr.", "phd"],
    canonical_keywords: "Dr., PhD, doktors",
};

// No bonus aliases: bachelor matches are ranked by field weights only.
const BACHELOR: DegreeRule = DegreeRule {
    level: DegreeLevel::Bachelor,
    keyword_aliases: &["bc.", "bc", "bakalaurs"],
    bonus_aliases: &[],
    markers: &["Bc."],
    folded_markers: &[],
    query_triggers: &["bakalaur", "bc."],
    canonical_keywords: "Bc., bakalaurs",
};

/// Ordered, versioned set of degree rules.
///
/// Rule order matters to the keyword extractor: rules are tried top-down and
/// the first trigger hit wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeTable {
    version: u32,
    rules: Vec<DegreeRule>,
}

impl DegreeTable {
    /// Create a table from explicit rules.
    pub fn new(version: u32, rules: Vec<DegreeRule>) -> Self {
        Self { version, rules }
    }

    /// The built-in master's / doctorate / bachelor's rules.
    pub fn standard() -> Self {
        Self::new(DEGREE_TABLE_VERSION, vec![MASTER, DOCTORATE, BACHELOR])
    }

    /// The built-in table behind an `Arc`, ready to be shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::standard())
    }

    /// Table revision.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[DegreeRule] {
        &self.rules
    }

    /// The rule a keyword is an alias of, if any.
    pub fn rule_for_keyword(&self, keyword: &str) -> Option<&DegreeRule> {
        self.rules.iter().find(|rule| rule.is_alias(keyword))
    }

    /// The rule for a given level, if the table has one.
    pub fn rule(&self, level: DegreeLevel) -> Option<&DegreeRule> {
        self.rules.iter().find(|rule| rule.level == level)
    }
}

impl Default for DegreeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_order() {
        let table = DegreeTable::standard();
        let levels: Vec<_> = table.rules().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![DegreeLevel::Master, DegreeLevel::Doctorate, DegreeLevel::Bachelor]
        );
        assert_eq!(table.version(), DEGREE_TABLE_VERSION);
    }

    #[test]
    fn test_rule_for_keyword() {
        let table = DegreeTable::standard();
        assert_eq!(table.rule_for_keyword("mg").unwrap().level, DegreeLevel::Master);
        assert_eq!(table.rule_for_keyword("maģistrs").unwrap().level, DegreeLevel::Master);
        assert_eq!(table.rule_for_keyword("phd").unwrap().level, DegreeLevel::Doctorate);
        assert_eq!(table.rule_for_keyword("bakalaurs").unwrap().level, DegreeLevel::Bachelor);
        assert!(table.rule_for_keyword("profesors").is_none());
        // Aliases are compared after lowercasing by the caller.
        assert!(table.rule_for_keyword("Mg.").is_none());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let table = DegreeTable::standard();
        let master = table.rule(DegreeLevel::Master).unwrap();
        assert!(master.matches_degree("Mg. sc. ing."));
        assert!(!master.matches_degree("mg. sc. ing."));
        assert!(!master.matches_degree(""));
    }

    #[test]
    fn test_doctorate_folded_alias() {
        let table = DegreeTable::standard();
        let doctorate = table.rule(DegreeLevel::Doctorate).unwrap();
        assert!(doctorate.matches_degree("Dr. sc. ing."));
        assert!(doctorate.matches_degree("PhD"));
        assert!(doctorate.matches_degree("Zinātņu Doktors"));
        assert!(!doctorate.has_marker("Zinātņu Doktors"));
        assert!(!doctorate.matches_degree("Mg. sc."));
    }

    #[test]
    fn test_bonus_aliases() {
        let table = DegreeTable::standard();
        assert!(table.rule(DegreeLevel::Master).unwrap().grants_bonus("mg."));
        assert!(!table.rule(DegreeLevel::Master).unwrap().grants_bonus("maģistrs"));
        assert!(!table.rule(DegreeLevel::Doctorate).unwrap().grants_bonus("doktors"));
        assert!(!table.rule(DegreeLevel::Bachelor).unwrap().grants_bonus("bc."));
    }
}
