use super::criticality::any_critical;
use super::scoring::{score, WORD_MATCH_POINTS};
use super::types::{
    ClassificationResult, DepartmentScoreboard, SymptomPhrase, TriageStatus,
    EMERGENCY_DEPARTMENT, GENERAL_DEPARTMENT,
};
use crate::knowledge::KnowledgeBase;

/// A critical case whose best department scored below this is treated as
/// unidentified and sent to Emergency.
pub const MIN_CONFIDENT_SCORE: u32 = WORD_MATCH_POINTS;

/// Decide status and department for a set of phrases.
pub fn resolve(phrases: &[SymptomPhrase], kb: &KnowledgeBase) -> ClassificationResult {
    let status = TriageStatus::from_critical(any_critical(phrases, kb));
    let board = score(phrases, status.is_critical(), kb);
    resolve_scoreboard(status, &board)
}

/// Pick the winning department from a scoreboard and apply the critical
/// safety override.
///
/// When nothing scored at all the request carries no routing signal and
/// falls back to "General" instead of the first configured department.
pub fn resolve_scoreboard(status: TriageStatus, board: &DepartmentScoreboard) -> ClassificationResult {
    let (winner, top_score) = match board.winner() {
        Some((winner, top_score)) if top_score > 0 => (winner, top_score),
        _ => (GENERAL_DEPARTMENT, 0),
    };

    let department = if status.is_critical()
        && (winner == GENERAL_DEPARTMENT || top_score < MIN_CONFIDENT_SCORE)
    {
        tracing::debug!(
            winner,
            top_score,
            "Unidentified critical case, routing to Emergency"
        );
        EMERGENCY_DEPARTMENT
    } else {
        winner
    };

    ClassificationResult {
        status,
        department: department.to_string(),
    }
}
