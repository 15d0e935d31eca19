//! Agent dispatch endpoint.

use crate::errors::TokenServiceError;
use crate::models::{DispatchAcknowledgment, DispatchRequest};
use crate::observability::metrics::{record_dispatch_ack, record_error};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::routes::AppState;
use crate::services::dispatch;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handle agent dispatch request.
///
/// POST /dispatch-agent
///
/// Returns an acknowledgment only. Agent workers join rooms on their own.
/// Bodies the JSON extractor rejects are reported as `BAD_REQUEST` in the
/// service's error shape.
#[instrument(
    name = "token.dispatch",
    skip_all,
    fields(room_hash, agent_type, status)
)]
pub async fn dispatch_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> Result<Json<DispatchAcknowledgment>, TokenServiceError> {
    let result = payload
        .map_err(|rejection| TokenServiceError::BadRequest(rejection.body_text()))
        .and_then(|Json(request)| {
            let span = tracing::Span::current();
            span.record("room_hash", hash_for_correlation(&request.room).as_str());
            span.record("agent_type", request.agent_type.as_str());

            request
                .validate()
                .map_err(|msg| TokenServiceError::BadRequest(msg.to_string()))?;
            dispatch::acknowledge_dispatch(&state.config, &request)
        });

    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_dispatch_ack(status);

    match result {
        Ok(ack) => {
            tracing::info!(
                target: "token.dispatch",
                language_count = ack.languages.len(),
                "Agent dispatch acknowledged"
            );
            Ok(Json(ack))
        }
        Err(e) => {
            let category = ErrorCategory::from(&e);
            record_error("dispatch_agent", category.as_str(), e.status_code());
            Err(e)
        }
    }
}
