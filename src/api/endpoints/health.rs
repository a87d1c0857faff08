//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub departments: usize,
    pub critical_phrases: usize,
}

/// `GET /health`: liveness plus the size of the loaded knowledge base.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let kb = ctx.service.knowledge();
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        departments: kb.departments().len(),
        critical_phrases: kb.critical_phrases().len(),
    })
}
