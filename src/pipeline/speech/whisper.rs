use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use super::{SpeechError, Transcriber};

/// Client for an OpenAI-compatible `/v1/audio/transcriptions` endpoint
/// (whisper.cpp server, faster-whisper-server, OpenAI).
pub struct WhisperClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    fn client(&self) -> Result<reqwest::blocking::Client, SpeechError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| SpeechError::Http(e.to_string()))
    }

    fn form(&self, audio_path: &Path) -> Result<Form, SpeechError> {
        let mime = mime_guess::from_path(audio_path).first_or_octet_stream();
        let part = Part::file(audio_path)?
            .mime_str(mime.essence_str())
            .map_err(|e| SpeechError::Http(e.to_string()))?;
        Ok(Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", part))
    }
}

impl Transcriber for WhisperClient {
    fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError> {
        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        let mut request = self.client()?.post(&url).multipart(self.form(audio_path)?);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                SpeechError::Http(format!("Request timed out after {}s", self.timeout_secs))
            } else {
                SpeechError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpeechError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = response
            .json()
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;
        let text = parsed.text.trim().to_string();
        tracing::debug!(chars = text.len(), "Audio transcribed");
        Ok(text)
    }
}
