//! Room token endpoint.

use crate::errors::TokenServiceError;
use crate::models::{TokenQuery, TokenResponse};
use crate::observability::metrics::{record_error, record_token_issuance};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::routes::AppState;
use crate::services::token_issuer;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle room token request.
///
/// GET /token?room=<room>&identity=<identity>
///
/// Identity and room are logged only as correlation hashes; the token is
/// never logged.
#[instrument(
    name = "token.issue",
    skip_all,
    fields(room_hash, identity_hash, status)
)]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, TokenServiceError> {
    let start = Instant::now();

    let result = query
        .into_request()
        .map_err(|msg| TokenServiceError::BadRequest(msg.to_string()))
        .and_then(|request| {
            let span = tracing::Span::current();
            span.record("room_hash", hash_for_correlation(&request.room).as_str());
            span.record("identity_hash", hash_for_correlation(&request.identity).as_str());
            token_issuer::issue_token(&state.config, &request)
        });

    let duration = start.elapsed();
    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_token_issuance(status, duration);

    match result {
        Ok(response) => {
            tracing::info!(target: "token.issue", "Room token issued");
            Ok(Json(response))
        }
        Err(e) => {
            let category = ErrorCategory::from(&e);
            record_error("issue_token", category.as_str(), e.status_code());
            Err(e)
        }
    }
}
