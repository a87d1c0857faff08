//! Lightweight language detection for incoming symptom reports.
//!
//! Non-Latin scripts are recognised by character ranges; Latin-script
//! languages by counting common function words and symptom vocabulary.
//! Anything undecided is treated as English, which is the canonical
//! language and therefore skips translation.

use super::LanguageDetector;
use crate::config::CANONICAL_LANGUAGE;

/// Word indicators per Latin-script language, ISO 639-1 coded.
/// English is listed first and wins ties.
const LATIN_INDICATORS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "i", "have", "has", "my", "is", "am", "with", "in", "of", "since",
            "feel", "feeling", "it", "for", "was", "pain", "severe", "chest", "head",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "je", "j", "ai", "mal", "de", "des", "et", "une", "un", "au",
            "à", "avec", "depuis", "mon", "ma", "est", "suis", "douleur", "tête", "ventre",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "los", "las", "tengo", "dolor", "de", "y", "con", "mi", "me", "una",
            "un", "desde", "estoy", "cabeza", "pecho", "muy",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "ich", "habe", "und", "mit", "schmerzen", "mein", "meine",
            "ist", "seit", "nicht", "kopf", "brust", "bin",
        ],
    ),
];

/// Heuristic detector; see module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDetector;

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, text: &str) -> String {
        detect_language(text)
    }
}

/// Detect the language of `text` as an ISO 639-1 code.
pub fn detect_language(text: &str) -> String {
    if let Some(code) = detect_script(text) {
        return code.to_string();
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut best = (CANONICAL_LANGUAGE, 0usize);
    for &(code, indicators) in LATIN_INDICATORS {
        let score = words.iter().filter(|w| indicators.contains(w)).count();
        if score > best.1 {
            best = (code, score);
        }
    }
    best.0.to_string()
}

/// Languages identified by script alone. Returns the code of the script
/// that covers at least half of the alphabetic characters.
fn detect_script(text: &str) -> Option<&'static str> {
    let mut total = 0usize;
    let mut counts = [0usize; 6];
    const CODES: [&str; 6] = ["hi", "bn", "ta", "ar", "ru", "zh"];

    for ch in text.chars().filter(|c| c.is_alphabetic()) {
        total += 1;
        let slot = match ch as u32 {
            0x0900..=0x097F => Some(0),
            0x0980..=0x09FF => Some(1),
            0x0B80..=0x0BFF => Some(2),
            0x0600..=0x06FF => Some(3),
            0x0400..=0x04FF => Some(4),
            0x4E00..=0x9FFF => Some(5),
            _ => None,
        };
        if let Some(slot) = slot {
            counts[slot] += 1;
        }
    }

    if total == 0 {
        return None;
    }
    counts
        .iter()
        .enumerate()
        .max_by_key(|(_, c)| **c)
        .filter(|(_, c)| **c * 2 >= total && **c > 0)
        .map(|(i, _)| CODES[i])
}
