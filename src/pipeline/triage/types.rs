use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback department present on every scoreboard.
pub const GENERAL_DEPARTMENT: &str = "General";
/// Target of the critical safety override and the trauma boost.
pub const EMERGENCY_DEPARTMENT: &str = "Emergency";
/// Target of the cardiac boost.
pub const CARDIOLOGY_DEPARTMENT: &str = "Cardiology";

pub const DEFAULT_DOCTOR: &str = "General Physician";
pub const DEFAULT_PREDICTION: &str = "Medical Condition";
pub const EMERGENCY_PREDICTION: &str = "Critical Emergency";
pub const CARDIOLOGY_PREDICTION: &str = "Cardiac Event";

/// One normalized clause of a symptom report: lowercase, punctuation-free,
/// trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomPhrase(String);

impl SymptomPhrase {
    /// Wrap an already-normalized segment. Returns `None` for blank input.
    pub(crate) fn new(segment: &str) -> Option<Self> {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct whitespace-separated words.
    pub fn words(&self) -> HashSet<&str> {
        self.0.split_whitespace().collect()
    }
}

impl fmt::Display for SymptomPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall triage status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriageStatus {
    Critical,
    Normal,
}

impl TriageStatus {
    pub fn from_critical(is_critical: bool) -> Self {
        if is_critical {
            Self::Critical
        } else {
            Self::Normal
        }
    }

    pub fn is_critical(self) -> bool {
        self == Self::Critical
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Normal => "Normal",
        }
    }
}

impl fmt::Display for TriageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request department scores, in insertion order.
///
/// Insertion order is the tie-break: the earliest department with the
/// highest score wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentScoreboard {
    entries: Vec<(String, u32)>,
}

impl DepartmentScoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `department` has an entry (score 0 when newly created).
    pub fn ensure(&mut self, department: &str) -> &mut u32 {
        let idx = match self.entries.iter().position(|(d, _)| d == department) {
            Some(idx) => idx,
            None => {
                self.entries.push((department.to_string(), 0));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Add points, creating the department entry if absent.
    pub fn add(&mut self, department: &str, points: u32) {
        *self.ensure(department) += points;
    }

    pub fn get(&self, department: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(d, _)| d == department)
            .map(|(_, s)| *s)
    }

    /// Highest-scoring department; ties go to the earliest entry.
    pub fn winner(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (department, score) in &self.entries {
            match best {
                Some((_, top)) if *score <= top => {}
                _ => best = Some((department.as_str(), *score)),
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(d, s)| (d.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the routing resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: TriageStatus,
    pub department: String,
}

/// Final record returned for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Text as received by the service (before translation).
    pub input: String,
    /// Canonical-language text that was classified.
    pub translated_text: String,
    pub final_status: TriageStatus,
    pub department: String,
    pub disease_prediction: String,
    pub doctor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_phrase_rejected() {
        assert!(SymptomPhrase::new("   ").is_none());
        assert_eq!(SymptomPhrase::new(" fever ").unwrap().as_str(), "fever");
    }

    #[test]
    fn phrase_words_are_a_set() {
        let phrase = SymptomPhrase::new("blood in blood stool").unwrap();
        let words = phrase.words();
        assert_eq!(words.len(), 3);
        assert!(words.contains("stool"));
    }

    #[test]
    fn status_serializes_as_label() {
        assert_eq!(serde_json::to_string(&TriageStatus::Critical).unwrap(), "\"Critical\"");
        assert_eq!(TriageStatus::from_critical(false).to_string(), "Normal");
    }

    #[test]
    fn scoreboard_ensure_keeps_existing_score() {
        let mut board = DepartmentScoreboard::new();
        board.add("Cardiology", 10);
        *board.ensure("Cardiology") += 5;
        board.ensure("General");
        assert_eq!(board.get("Cardiology"), Some(15));
        assert_eq!(board.get("General"), Some(0));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn scoreboard_ties_go_to_first_entry() {
        let mut board = DepartmentScoreboard::new();
        board.add("Neurology", 5);
        board.add("Cardiology", 5);
        board.ensure("General");
        assert_eq!(board.winner(), Some(("Neurology", 5)));
    }

    #[test]
    fn scoreboard_strictly_higher_wins() {
        let mut board = DepartmentScoreboard::new();
        board.add("Neurology", 5);
        board.add("Cardiology", 6);
        assert_eq!(board.winner(), Some(("Cardiology", 6)));
    }

    #[test]
    fn empty_scoreboard_has_no_winner() {
        assert!(DepartmentScoreboard::new().winner().is_none());
    }
}
