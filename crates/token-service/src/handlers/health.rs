//! Health check handler.

use crate::models::HealthResponse;
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Liveness probe.
///
/// Always 200 while the process serves requests. The configuration flags let
/// operators spot a deployment that will answer every token request with
/// `CONFIGURATION_ERROR`.
///
/// ```json
/// {
///   "status": "healthy",
///   "signing_configured": true,
///   "media_url_configured": true
/// }
/// ```
#[instrument(skip_all, name = "token.health.check")]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        signing_configured: state.config.signing_credentials().is_some(),
        media_url_configured: state.config.media_url.is_some(),
    })
}
