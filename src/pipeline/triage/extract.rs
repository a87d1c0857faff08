use std::sync::LazyLock;

use regex::Regex;

use super::types::SymptomPhrase;

/// Anything that is neither a word character nor whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

/// Logical connectors that separate symptom clauses.
static CONNECTORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\band\b|\bwith\b|\bdue to\b|\bbecause of\b").expect("Invalid connector regex")
});

/// Split raw text into ordered, normalized symptom phrases.
///
/// Commas and periods become spaces first so that "pain,vomiting" splits
/// into two words; all other punctuation is dropped.
pub fn extract(text: &str) -> Vec<SymptomPhrase> {
    let lower = text.to_lowercase().replace([',', '.'], " ");
    let cleaned = NON_WORD.replace_all(&lower, "");

    CONNECTORS
        .split(&cleaned)
        .filter_map(SymptomPhrase::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(phrases: &[SymptomPhrase]) -> Vec<&str> {
        phrases.iter().map(SymptomPhrase::as_str).collect()
    }

    #[test]
    fn splits_on_and() {
        let phrases = extract("I have severe chest pain and vomiting blood");
        assert_eq!(texts(&phrases), vec!["i have severe chest pain", "vomiting blood"]);
    }

    #[test]
    fn splits_on_every_connector() {
        let phrases = extract("Fever with chills due to infection because of travel and cough");
        assert_eq!(
            texts(&phrases),
            vec!["fever", "chills", "infection", "travel", "cough"]
        );
    }

    #[test]
    fn connectors_match_whole_words_only() {
        let phrases = extract("sandy withdrawal");
        assert_eq!(texts(&phrases), vec!["sandy withdrawal"]);
    }

    #[test]
    fn commas_and_periods_separate_words() {
        let phrases = extract("Pain,vomiting.Dizziness");
        assert_eq!(texts(&phrases), vec!["pain vomiting dizziness"]);
    }

    #[test]
    fn other_punctuation_is_stripped() {
        let phrases = extract("Headache!!! (since yesterday) - can't sleep?");
        assert_eq!(texts(&phrases), vec!["headache since yesterday  cant sleep"]);
    }

    #[test]
    fn single_clean_phrase_is_unchanged() {
        assert_eq!(texts(&extract("fever")), vec!["fever"]);
        let again = extract(extract("fever")[0].as_str());
        assert_eq!(texts(&again), vec!["fever"]);
    }

    #[test]
    fn never_yields_empty_phrases() {
        for input in ["", "   ", "and", "and and with", "...,,,", "!!!", "pain and", " with fever "] {
            let phrases = extract(input);
            assert!(
                phrases.iter().all(|p| !p.as_str().trim().is_empty()),
                "empty phrase for {input:?}: {phrases:?}"
            );
        }
    }

    #[test]
    fn degenerate_input_yields_no_phrases() {
        assert!(extract("").is_empty());
        assert!(extract("?!.,").is_empty());
        assert!(extract(" and ").is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let phrases = extract("rash and itching and swelling");
        assert_eq!(texts(&phrases), vec!["rash", "itching", "swelling"]);
    }
}
