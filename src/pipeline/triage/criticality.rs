//! Criticality rules.
//!
//! A phrase is critical when any rule in [`RULES`] fires. Rules run in
//! table order and stop at the first match:
//!
//! 1. knowledge-base subset match (order-independent, extra words allowed)
//! 2. cardiac: "heart" with "pain" or "attack"
//! 3. hemorrhagic output: "blood" with vomit/stool/urine/cough
//! 4. trauma vocabulary, matched as raw substrings

use std::collections::HashSet;

use super::types::SymptomPhrase;
use crate::knowledge::KnowledgeBase;

/// Bodily outputs that make "blood" critical.
const HEMORRHAGIC_OUTPUTS: &[&str] = &["vomit", "vomiting", "stool", "urine", "cough", "coughing"];

/// Trauma and environmental-injury triggers. Matched as substrings of the
/// raw phrase, so "fell" also fires inside "fallen" style compounds.
pub const TRAUMA_TRIGGERS: &[&str] = &[
    // Accidents
    "accident", "crash", "collision", "fall", "fell", "hit by",
    // Injuries
    "injury", "trauma", "wound", "burn", "cut", "bleed", "fracture",
    "broken bone", "break", "laceration", "contusion", "bruise", "sprain",
    "dislocation", "amputation", "concussion", "hemorrhage", "puncture",
    "crush injury", "bite",
    // Collapse and poisoning
    "unconscious", "collapse", "suicide", "poison", "stroke",
    "electrocution", "drown",
    // Environmental
    "frostbite", "hypothermia", "heatstroke", "dehydration", "suffocation",
    "asphyxiation",
];

/// Inputs shared by every rule for one phrase.
pub struct RuleInput<'a> {
    pub phrase: &'a str,
    pub words: &'a HashSet<&'a str>,
    pub kb: &'a KnowledgeBase,
}

/// A named criticality predicate.
pub struct CriticalityRule {
    pub name: &'static str,
    pub check: fn(&RuleInput<'_>) -> bool,
}

/// Rules in evaluation order.
pub static RULES: &[CriticalityRule] = &[
    CriticalityRule {
        name: "knowledge_base_subset",
        check: knowledge_base_subset,
    },
    CriticalityRule {
        name: "cardiac",
        check: cardiac,
    },
    CriticalityRule {
        name: "hemorrhagic_output",
        check: hemorrhagic_output,
    },
    CriticalityRule {
        name: "trauma_keyword",
        check: trauma_keyword,
    },
];

fn knowledge_base_subset(input: &RuleInput<'_>) -> bool {
    input
        .kb
        .critical_phrases()
        .iter()
        .any(|critical| critical.words.iter().all(|w| input.words.contains(w.as_str())))
}

fn cardiac(input: &RuleInput<'_>) -> bool {
    input.words.contains("heart")
        && (input.words.contains("pain") || input.words.contains("attack"))
}

fn hemorrhagic_output(input: &RuleInput<'_>) -> bool {
    input.words.contains("blood")
        && HEMORRHAGIC_OUTPUTS.iter().any(|o| input.words.contains(o))
}

fn trauma_keyword(input: &RuleInput<'_>) -> bool {
    TRAUMA_TRIGGERS.iter().any(|t| input.phrase.contains(t))
}

/// Name of the first rule that marks `phrase` critical, if any.
pub fn matching_rule(phrase: &SymptomPhrase, kb: &KnowledgeBase) -> Option<&'static str> {
    let words = phrase.words();
    let input = RuleInput {
        phrase: phrase.as_str(),
        words: &words,
        kb,
    };
    RULES.iter().find(|rule| (rule.check)(&input)).map(|rule| rule.name)
}

pub fn is_critical(phrase: &SymptomPhrase, kb: &KnowledgeBase) -> bool {
    matching_rule(phrase, kb).is_some()
}

/// Request-level criticality: true on the first critical phrase.
pub fn any_critical(phrases: &[SymptomPhrase], kb: &KnowledgeBase) -> bool {
    for (index, phrase) in phrases.iter().enumerate() {
        if let Some(rule) = matching_rule(phrase, kb) {
            tracing::debug!(phrase_index = index, rule, "Critical phrase detected");
            return true;
        }
    }
    false
}
