//! Language handling ahead of triage: detect the input language and
//! translate it to the canonical language.

pub mod detect;
pub mod translate;

use thiserror::Error;

pub use detect::{detect_language, HeuristicDetector};
pub use translate::{translate_to_canonical, LibreTranslateClient, PassthroughTranslator};

/// Identifies the language of a text as an ISO 639-1 code. Never fails;
/// implementations fall back to the canonical language.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> String;
}

/// Translates text from `source_lang` into the canonical language.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError>;
}

/// Translation collaborator errors.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation request failed: {0}")]
    Http(String),

    #[error("Translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),
}
