use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// `GET /`: service banner.
pub async fn banner() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Medical symptom triage API is running. POST /analyze-text/ or /analyze-audio/.",
    })
}
