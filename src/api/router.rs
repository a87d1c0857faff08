//! HTTP router for the triage service.
//!
//! Layers (outermost first): CORS → request tracing → body limit.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Room for multipart boundaries and headers on top of the audio payload.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the API router around a shared context.
pub fn triage_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.max_audio_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Browser front-ends are served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::home::banner))
        .route("/health", get(endpoints::health::check))
        .route("/analyze-text/", post(endpoints::analyze::analyze_text))
        .route("/analyze-audio/", post(endpoints::analyze::analyze_audio))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
