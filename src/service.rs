//! Triage service: language handling, transcription and classification
//! composed behind one handle shared by the HTTP API and the CLI.
//!
//! All methods are synchronous. The configured collaborators may perform
//! blocking HTTP calls, so async callers go through `spawn_blocking`.

use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::knowledge::{KnowledgeBase, KnowledgeError};
use crate::pipeline::language::{
    translate_to_canonical, HeuristicDetector, LanguageDetector, LibreTranslateClient,
    PassthroughTranslator, Translator,
};
use crate::pipeline::speech::{stage_audio, SpeechError, Transcriber, UnavailableTranscriber, WhisperClient};
use crate::pipeline::triage::{classify_translated, PipelineResult};

/// Result of analysing an uploaded recording.
#[derive(Debug, Clone, Serialize)]
pub struct AudioAnalysis {
    pub transcribed_text: String,
    pub result: PipelineResult,
}

pub struct TriageService {
    kb: Arc<KnowledgeBase>,
    detector: Box<dyn LanguageDetector>,
    translator: Box<dyn Translator>,
    transcriber: Box<dyn Transcriber>,
    canonical_language: String,
}

impl TriageService {
    /// Offline service: heuristic detection, no translation, no transcription.
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            detector: Box::new(HeuristicDetector),
            translator: Box::new(PassthroughTranslator),
            transcriber: Box::new(UnavailableTranscriber),
            canonical_language: crate::config::CANONICAL_LANGUAGE.to_string(),
        }
    }

    /// Load the knowledge base and wire the HTTP collaborators named in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, KnowledgeError> {
        let kb = KnowledgeBase::load_dir(&config.knowledge_dir)?;
        let mut service = Self::new(Arc::new(kb)).with_canonical_language(&config.canonical_language);

        if let Some(url) = &config.translate_url {
            tracing::info!(url = %url, "Translation service configured");
            service = service.with_translator(Box::new(LibreTranslateClient::new(
                url,
                &config.canonical_language,
                config.http_timeout_secs,
            )));
        }
        if let Some(url) = &config.transcribe_url {
            tracing::info!(url = %url, model = %config.transcribe_model, "Transcription service configured");
            service = service.with_transcriber(Box::new(WhisperClient::new(
                url,
                &config.transcribe_model,
                config.http_timeout_secs,
            )));
        }
        Ok(service)
    }

    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_transcriber(mut self, transcriber: Box<dyn Transcriber>) -> Self {
        self.transcriber = transcriber;
        self
    }

    pub fn with_canonical_language(mut self, lang: &str) -> Self {
        self.canonical_language = lang.to_string();
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Detect, translate to the canonical language, classify.
    pub fn analyze_text(&self, text: &str) -> PipelineResult {
        let lang = self.detector.detect(text);
        tracing::debug!(lang = %lang, "Input language detected");
        let translated =
            translate_to_canonical(self.translator.as_ref(), text, &lang, &self.canonical_language);
        classify_translated(text, &translated, &self.kb)
    }

    /// Stage the upload, transcribe it, then run [`Self::analyze_text`]
    /// on the transcript. The staged file is removed before returning.
    pub fn analyze_audio(
        &self,
        audio: &[u8],
        file_name: Option<&str>,
    ) -> Result<AudioAnalysis, SpeechError> {
        let staged = stage_audio(audio, file_name)?;
        let transcribed_text = self.transcriber.transcribe(staged.path())?;
        drop(staged);

        tracing::info!(chars = transcribed_text.len(), "Transcription complete");
        let result = self.analyze_text(&transcribed_text);
        Ok(AudioAnalysis {
            transcribed_text,
            result,
        })
    }
}
