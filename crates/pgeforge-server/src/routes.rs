//! HTTP routes for the pgeforge server.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use pgeforge_core::{BuildOutcome, BuildPipeline};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::protocol::{CompileRequest, CompileSuccess, Rejection, StageFailure};

/// Status reported when the toolchain exits zero without producing the
/// artifact. Deliberately non-standard so operators can tell a misbehaving
/// toolchain apart from bad user code.
const ARTIFACT_MISSING_STATUS: u16 = 469;

/// Application state shared across handlers.
pub struct AppState {
    /// The build pipeline. Stateless across requests; its only side effects
    /// are the per-request workspace directories.
    pub pipeline: Arc<BuildPipeline>,
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/compile", post(compile_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Compile endpoint: request validation, one pipeline run, and translation
/// of the outcome onto the wire contract.
async fn compile_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let code = match serde_json::from_slice::<CompileRequest>(&body) {
        Ok(CompileRequest { code: Some(code) }) => code,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(Rejection::missing_parameters()),
            )
                .into_response();
        }
    };

    match state.pipeline.build(&code).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => {
            tracing::error!("build pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": "internal error" })),
            )
                .into_response()
        }
    }
}

/// Map a build outcome onto a response.
fn outcome_response(outcome: BuildOutcome) -> Response {
    match outcome {
        BuildOutcome::Success { html } => Json(CompileSuccess { html }).into_response(),

        BuildOutcome::Rejected { diagnostics } => (
            StatusCode::BAD_REQUEST,
            Json(Rejection::sanitization(&diagnostics)),
        )
            .into_response(),

        BuildOutcome::CompileFailed { stdout, stderr } => (
            StatusCode::BAD_REQUEST,
            Json(StageFailure::new("compile", stdout, stderr)),
        )
            .into_response(),

        BuildOutcome::LinkFailed { stdout, stderr } => (
            StatusCode::BAD_REQUEST,
            Json(StageFailure::new("link", stdout, stderr)),
        )
            .into_response(),

        BuildOutcome::ArtifactMissing => (
            StatusCode::from_u16(ARTIFACT_MISSING_STATUS)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(serde_json::json!({ "message": "unknown error" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_health_json() {
        let health = serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        });
        assert_eq!(health["status"], "ok");
    }
}
