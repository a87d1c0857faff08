//! Speech input: stage uploaded audio on disk and transcribe it.

pub mod staging;
pub mod whisper;

use std::path::Path;

use thiserror::Error;

pub use staging::{stage_audio, StagedAudio};
pub use whisper::WhisperClient;

/// Turns an audio file into text.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError>;
}

/// Placeholder used when no transcription service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTranscriber;

impl Transcriber for UnavailableTranscriber {
    fn transcribe(&self, _audio_path: &Path) -> Result<String, SpeechError> {
        Err(SpeechError::Unavailable)
    }
}

/// Speech pipeline errors.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("No transcription service configured")]
    Unavailable,

    #[error("Uploaded audio is empty")]
    EmptyAudio,

    #[error("Audio staging failed: {0}")]
    Staging(#[from] std::io::Error),

    #[error("Transcription request failed: {0}")]
    Http(String),

    #[error("Transcription service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid transcription response: {0}")]
    InvalidResponse(String),
}
