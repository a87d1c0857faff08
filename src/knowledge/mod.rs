//! Knowledge base: the four read-only mappings that drive triage.
//!
//! Loaded once at startup from JSON files and shared behind an `Arc` by
//! every classification. There is no mutation API once a `KnowledgeBase`
//! has been built.

pub mod loader;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub use loader::KnowledgeSources;

/// A stored critical phrase with its pre-computed word set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPhrase {
    pub phrase: String,
    /// Distinct words of `phrase`, in first-seen order.
    pub words: Vec<String>,
}

impl CriticalPhrase {
    /// Normalize and tokenize a configured phrase.
    /// Returns `None` when the phrase has no words (it would match everything).
    pub fn parse(raw: &str) -> Option<Self> {
        let phrase = raw.trim().to_lowercase();
        let mut words: Vec<String> = Vec::new();
        for word in phrase.split_whitespace() {
            if !words.iter().any(|w| w == word) {
                words.push(word.to_string());
            }
        }
        if words.is_empty() {
            return None;
        }
        Some(Self { phrase, words })
    }
}

/// A department and its ordered routing keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentKeywords {
    pub department: String,
    pub keywords: Vec<String>,
}

/// One keyword → disease label rule within a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRule {
    pub keyword: String,
    pub label: String,
}

/// Immutable triage vocabulary.
///
/// Department names need not agree across the maps; every lookup tolerates
/// a missing key.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    critical_phrases: Vec<CriticalPhrase>,
    departments: Vec<DepartmentKeywords>,
    doctors: HashMap<String, String>,
    disease_rules: HashMap<String, Vec<DiseaseRule>>,
}

/// Knowledge loading errors. A missing file is not an error.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Cannot read knowledge file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed knowledge file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl KnowledgeBase {
    /// An empty knowledge base: nothing is critical by lookup, every
    /// request routes by hard rules and defaults only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a critical phrase. Phrases without words are ignored.
    pub fn with_critical_phrase(mut self, phrase: &str) -> Self {
        match CriticalPhrase::parse(phrase) {
            Some(parsed) => self.critical_phrases.push(parsed),
            None => tracing::warn!("Ignoring empty critical phrase"),
        }
        self
    }

    /// Add (or extend) a department's keywords. Department order is the
    /// order of first insertion.
    pub fn with_department<I, S>(mut self, department: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty());
        match self
            .departments
            .iter_mut()
            .find(|d| d.department == department)
        {
            Some(existing) => existing.keywords.extend(keywords),
            None => self.departments.push(DepartmentKeywords {
                department: department.to_string(),
                keywords: keywords.collect(),
            }),
        }
        self
    }

    pub fn with_doctor(mut self, department: &str, doctor: &str) -> Self {
        self.doctors
            .insert(department.to_string(), doctor.to_string());
        self
    }

    pub fn with_disease_rule(mut self, department: &str, keyword: &str, label: &str) -> Self {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            tracing::warn!(department, "Ignoring disease rule with empty keyword");
            return self;
        }
        self.disease_rules
            .entry(department.to_string())
            .or_default()
            .push(DiseaseRule {
                keyword,
                label: label.to_string(),
            });
        self
    }

    pub fn critical_phrases(&self) -> &[CriticalPhrase] {
        &self.critical_phrases
    }

    /// Departments in configuration order.
    pub fn departments(&self) -> &[DepartmentKeywords] {
        &self.departments
    }

    pub fn doctor_for(&self, department: &str) -> Option<&str> {
        self.doctors.get(department).map(String::as_str)
    }

    /// Disease rules for a department; empty when the department has none.
    pub fn disease_rules_for(&self, department: &str) -> &[DiseaseRule] {
        self.disease_rules
            .get(department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    pub fn disease_rule_count(&self) -> usize {
        self.disease_rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.critical_phrases.is_empty()
            && self.departments.is_empty()
            && self.doctors.is_empty()
            && self.disease_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_phrase_tokenizes_and_dedups() {
        let parsed = CriticalPhrase::parse("  Vomiting blood blood ").unwrap();
        assert_eq!(parsed.phrase, "vomiting blood blood");
        assert_eq!(parsed.words, vec!["vomiting", "blood"]);
    }

    #[test]
    fn blank_critical_phrase_is_rejected() {
        assert!(CriticalPhrase::parse("   ").is_none());
        let kb = KnowledgeBase::new().with_critical_phrase("");
        assert!(kb.critical_phrases().is_empty());
    }

    #[test]
    fn departments_keep_insertion_order() {
        let kb = KnowledgeBase::new()
            .with_department("Neurology", ["headache"])
            .with_department("Cardiology", ["chest"])
            .with_department("Neurology", ["Seizure"]);
        let names: Vec<_> = kb.departments().iter().map(|d| d.department.as_str()).collect();
        assert_eq!(names, vec!["Neurology", "Cardiology"]);
        assert_eq!(kb.departments()[0].keywords, vec!["headache", "seizure"]);
    }

    #[test]
    fn lookups_tolerate_missing_departments() {
        let kb = KnowledgeBase::new().with_doctor("Cardiology", "Cardiologist");
        assert_eq!(kb.doctor_for("Cardiology"), Some("Cardiologist"));
        assert_eq!(kb.doctor_for("Dermatology"), None);
        assert!(kb.disease_rules_for("Dermatology").is_empty());
    }

    #[test]
    fn disease_rules_counted_across_departments() {
        let kb = KnowledgeBase::new()
            .with_disease_rule("Cardiology", "chest pain", "Angina")
            .with_disease_rule("Cardiology", "palpitation", "Arrhythmia")
            .with_disease_rule("Neurology", "", "Ignored")
            .with_disease_rule("Neurology", "migraine", "Migraine");
        assert_eq!(kb.disease_rule_count(), 3);
        assert_eq!(kb.disease_rules_for("Cardiology")[1].label, "Arrhythmia");
    }

    #[test]
    fn new_knowledge_base_is_empty() {
        assert!(KnowledgeBase::new().is_empty());
        assert!(!KnowledgeBase::new().with_doctor("General", "GP").is_empty());
    }
}
