//! Classification endpoints.
//!
//! The service may block on its translation and transcription clients, so
//! every call is moved onto the blocking pool.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Form, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AudioAnalysisResponse, TextAnalysisResponse, TextForm};

/// `POST /analyze-text/`: classify a free-text symptom report.
pub async fn analyze_text(
    State(ctx): State<ApiContext>,
    Form(form): Form<TextForm>,
) -> Result<Json<TextAnalysisResponse>, ApiError> {
    tracing::debug!(chars = form.text.len(), "Text analysis requested");
    let service = ctx.service.clone();
    let text = form.text;
    let response = tokio::task::spawn_blocking(move || {
        let result = service.analyze_text(&text);
        TextAnalysisResponse::new(text, result)
    })
    .await?;
    Ok(Json(response))
}

/// `POST /analyze-audio/`: transcribe an uploaded recording, then classify it.
pub async fn analyze_audio(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<AudioAnalysisResponse>, ApiError> {
    let limit = ctx.max_audio_bytes;
    let mut upload: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        upload = Some((bytes.to_vec(), file_name));
        break;
    }

    let (bytes, file_name) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing `file` field".into()))?;
    if bytes.len() > limit {
        return Err(ApiError::PayloadTooLarge { limit });
    }
    tracing::info!(size = bytes.len(), file_name = ?file_name, "Audio analysis requested");

    let service = ctx.service.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        service.analyze_audio(&bytes, file_name.as_deref())
    })
    .await??;

    Ok(Json(analysis.into()))
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
