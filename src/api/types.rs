//! Shared state and response bodies for the HTTP API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pipeline::triage::{PipelineResult, TriageStatus};
use crate::service::{AudioAnalysis, TriageService};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<TriageService>,
    pub max_audio_bytes: usize,
}

impl ApiContext {
    pub fn new(service: Arc<TriageService>) -> Self {
        Self {
            service,
            max_audio_bytes: crate::config::DEFAULT_MAX_AUDIO_BYTES,
        }
    }

    pub fn with_max_audio_bytes(mut self, limit: usize) -> Self {
        self.max_audio_bytes = limit;
        self
    }
}

/// Form body of `POST /analyze-text/`.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiseaseInfo {
    pub top_department: String,
    pub disease_prediction: String,
    pub doctor: String,
}

/// Wire shape of a classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct Analysis {
    pub input: String,
    pub translated_text: String,
    pub final_status: TriageStatus,
    pub disease_info: DiseaseInfo,
}

impl From<PipelineResult> for Analysis {
    fn from(result: PipelineResult) -> Self {
        Self {
            input: result.input,
            translated_text: result.translated_text,
            final_status: result.final_status,
            disease_info: DiseaseInfo {
                top_department: result.department,
                disease_prediction: result.disease_prediction,
                doctor: result.doctor,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextAnalysisResponse {
    pub input_type: String,
    pub text_received: String,
    pub analysis: Analysis,
}

impl TextAnalysisResponse {
    pub fn new(text_received: String, result: PipelineResult) -> Self {
        Self {
            input_type: "text".into(),
            text_received,
            analysis: result.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AudioAnalysisResponse {
    pub input_type: String,
    pub transcribed_text: String,
    pub analysis: Analysis,
}

impl From<AudioAnalysis> for AudioAnalysisResponse {
    fn from(audio: AudioAnalysis) -> Self {
        Self {
            input_type: "audio".into(),
            transcribed_text: audio.transcribed_text,
            analysis: audio.result.into(),
        }
    }
}
