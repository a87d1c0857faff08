use super::types::{
    SymptomPhrase, CARDIOLOGY_DEPARTMENT, CARDIOLOGY_PREDICTION, DEFAULT_DOCTOR,
    DEFAULT_PREDICTION, EMERGENCY_DEPARTMENT, EMERGENCY_PREDICTION,
};
use crate::knowledge::KnowledgeBase;

/// Doctor title for a department, or the generic physician.
pub fn doctor_for(department: &str, kb: &KnowledgeBase) -> String {
    kb.doctor_for(department)
        .unwrap_or(DEFAULT_DOCTOR)
        .to_string()
}

/// Likely condition(s) for the routed department.
///
/// Every disease keyword found inside a phrase contributes its label;
/// labels are deduplicated in first-seen order and joined with ", ".
pub fn predict_disease(department: &str, phrases: &[SymptomPhrase], kb: &KnowledgeBase) -> String {
    let rules = kb.disease_rules_for(department);
    let mut labels: Vec<&str> = Vec::new();

    for phrase in phrases {
        for rule in rules {
            if phrase.as_str().contains(rule.keyword.as_str()) && !labels.contains(&rule.label.as_str()) {
                labels.push(&rule.label);
            }
        }
    }

    if !labels.is_empty() {
        return labels.join(", ");
    }

    match department {
        EMERGENCY_DEPARTMENT => EMERGENCY_PREDICTION,
        CARDIOLOGY_DEPARTMENT => CARDIOLOGY_PREDICTION,
        _ => DEFAULT_PREDICTION,
    }
    .to_string()
}
