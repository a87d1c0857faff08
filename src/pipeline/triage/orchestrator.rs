use super::extract::extract;
use super::labels::{doctor_for, predict_disease};
use super::routing::resolve;
use super::types::PipelineResult;
use crate::knowledge::KnowledgeBase;

/// Classify canonical-language text.
pub fn classify(text: &str, kb: &KnowledgeBase) -> PipelineResult {
    classify_translated(text, text, kb)
}

/// Classify `translated` while reporting `original` as the request input.
///
/// Pure and deterministic: identical text and knowledge base always give
/// the identical result.
pub fn classify_translated(original: &str, translated: &str, kb: &KnowledgeBase) -> PipelineResult {
    let phrases = extract(translated);
    let routing = resolve(&phrases, kb);
    let doctor = doctor_for(&routing.department, kb);
    let disease_prediction = predict_disease(&routing.department, &phrases, kb);

    tracing::info!(
        phrases = phrases.len(),
        status = %routing.status,
        department = %routing.department,
        "Symptoms classified"
    );

    PipelineResult {
        input: original.to_string(),
        translated_text: translated.to_string(),
        final_status: routing.status,
        department: routing.department,
        disease_prediction,
        doctor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::triage::types::TriageStatus;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new()
            .with_critical_phrase("vomiting blood")
            .with_department("Neurology", ["dizziness", "seizure"])
            .with_department("Cardiology", ["chest", "heart", "pain"])
            .with_department("Emergency", ["accident", "unconscious"])
            .with_doctor("Cardiology", "Cardiologist")
            .with_doctor("Emergency", "Emergency Physician")
            .with_doctor("Neurology", "Neurologist")
            .with_disease_rule("Cardiology", "chest pain", "Angina")
    }

    #[test]
    fn chest_pain_and_vomiting_blood_routes_to_cardiology() {
        let result = classify("I have severe chest pain and vomiting blood", &kb());
        assert_eq!(result.final_status, TriageStatus::Critical);
        assert_eq!(result.department, "Cardiology");
        assert_eq!(result.doctor, "Cardiologist");
        assert_eq!(result.disease_prediction, "Angina");
    }

    #[test]
    fn mild_headache_is_normal_general() {
        let result = classify("mild headache", &kb());
        assert_eq!(result.final_status, TriageStatus::Normal);
        assert_eq!(result.department, "General");
        assert_eq!(result.disease_prediction, "Medical Condition");
        assert_eq!(result.doctor, "General Physician");
    }

    #[test]
    fn empty_input_degrades_to_defaults() {
        for text in ["", "   ", "?!", "and with"] {
            let result = classify(text, &kb());
            assert_eq!(result.final_status, TriageStatus::Normal, "{text:?}");
            assert_eq!(result.department, "General");
            assert_eq!(result.disease_prediction, "Medical Condition");
            assert_eq!(result.doctor, "General Physician");
        }
    }

    #[test]
    fn trauma_routes_to_emergency() {
        let result = classify("Car accident, my leg is broken", &kb());
        assert_eq!(result.final_status, TriageStatus::Critical);
        assert_eq!(result.department, "Emergency");
        assert_eq!(result.doctor, "Emergency Physician");
        assert_eq!(result.disease_prediction, "Critical Emergency");
    }

    #[test]
    fn unmatched_critical_forced_to_emergency() {
        let result = classify("coughing blood", &KnowledgeBase::new());
        assert_eq!(result.final_status, TriageStatus::Critical);
        assert_eq!(result.department, "Emergency");
        assert_eq!(result.doctor, "General Physician");
        assert_eq!(result.disease_prediction, "Critical Emergency");
    }

    #[test]
    fn normal_routed_by_keywords() {
        let result = classify("dizziness since morning", &kb());
        assert_eq!(result.final_status, TriageStatus::Normal);
        assert_eq!(result.department, "Neurology");
        assert_eq!(result.doctor, "Neurologist");
    }

    #[test]
    fn translated_text_kept_separately() {
        let result = classify_translated("j'ai mal au coeur", "heart pain", &kb());
        assert_eq!(result.input, "j'ai mal au coeur");
        assert_eq!(result.translated_text, "heart pain");
        assert_eq!(result.department, "Cardiology");
    }

    #[test]
    fn classification_is_deterministic() {
        let kb = kb();
        let first = classify("chest pain with dizziness and accident", &kb);
        for _ in 0..20 {
            assert_eq!(classify("chest pain with dizziness and accident", &kb), first);
        }
    }
}
