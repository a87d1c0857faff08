use super::types::{
    DepartmentScoreboard, SymptomPhrase, CARDIOLOGY_DEPARTMENT, EMERGENCY_DEPARTMENT,
    GENERAL_DEPARTMENT,
};
use crate::knowledge::KnowledgeBase;

/// Points for a keyword that is one of the phrase's words.
pub const WORD_MATCH_POINTS: u32 = 5;
/// Points for a keyword found anywhere in the raw phrase. Awarded in
/// addition to `WORD_MATCH_POINTS`, so single-word hits score twice.
pub const PHRASE_MATCH_POINTS: u32 = 5;
/// Priority boost for cardiac and trauma cases that are already critical.
pub const PRIORITY_BOOST: u32 = 50;

const CARDIAC_WORDS: &[&str] = &["heart", "chest"];
const TRAUMA_MARKERS: &[&str] = &["accident", "fall", "crash", "trauma"];

/// Score every configured department (plus "General") for the phrases.
pub fn score(
    phrases: &[SymptomPhrase],
    is_critical: bool,
    kb: &KnowledgeBase,
) -> DepartmentScoreboard {
    let mut board = DepartmentScoreboard::new();
    for dept in kb.departments() {
        board.ensure(&dept.department);
    }
    board.ensure(GENERAL_DEPARTMENT);

    for phrase in phrases {
        let words = phrase.words();
        for dept in kb.departments() {
            let mut points = 0;
            for keyword in &dept.keywords {
                if words.contains(keyword.as_str()) {
                    points += WORD_MATCH_POINTS;
                }
                if phrase.as_str().contains(keyword.as_str()) {
                    points += PHRASE_MATCH_POINTS;
                }
            }
            if points > 0 {
                board.add(&dept.department, points);
            }
        }
    }

    if is_critical {
        apply_priority_boosts(&mut board, phrases);
    }

    board
}

fn apply_priority_boosts(board: &mut DepartmentScoreboard, phrases: &[SymptomPhrase]) {
    let cardiac = phrases.iter().any(|p| {
        let words = p.words();
        CARDIAC_WORDS.iter().any(|w| words.contains(w))
    });
    if cardiac {
        tracing::debug!(boost = PRIORITY_BOOST, "Cardiology priority boost");
        board.add(CARDIOLOGY_DEPARTMENT, PRIORITY_BOOST);
    }

    let joined = phrases
        .iter()
        .map(SymptomPhrase::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if TRAUMA_MARKERS.iter().any(|m| joined.contains(m)) {
        tracing::debug!(boost = PRIORITY_BOOST, "Emergency priority boost");
        board.add(EMERGENCY_DEPARTMENT, PRIORITY_BOOST);
    }
}
