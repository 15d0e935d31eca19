//! Agent dispatch acknowledgment.
//!
//! Nothing is dispatched from here. Agent workers run as separate processes
//! registered with the media server and join rooms on their own; this
//! service only confirms the request is well formed and that the deployment
//! holds the credentials those workers need.

use crate::config::Config;
use crate::errors::TokenServiceError;
use crate::models::{DispatchAcknowledgment, DispatchRequest};

/// Acknowledge a dispatch request.
///
/// `server_url` is carried for clients that send it and is not inspected.
///
/// # Errors
///
/// Returns `Configuration` if the key id or secret is unset. The media URL
/// is not required here.
pub fn acknowledge_dispatch(
    config: &Config,
    request: &DispatchRequest,
) -> Result<DispatchAcknowledgment, TokenServiceError> {
    let missing = config.missing_signing_settings();
    if !missing.is_empty() {
        return Err(TokenServiceError::Configuration(format!(
            "Media server credentials not configured: {}",
            missing.join(", ")
        )));
    }

    tracing::debug!(
        target: "token.dispatch",
        agent_type = %request.agent_type,
        language_count = request.languages.len(),
        "Dispatch request accepted"
    );

    Ok(DispatchAcknowledgment {
        success: true,
        message: format!(
            "Agent dispatch acknowledged for room '{}'. If you have agents running as workers, they should automatically join the room.",
            request.room
        ),
        room: request.room.clone(),
        languages: request.languages.clone(),
        note: format!(
            "Make sure your {} agent is running with: {}",
            request.agent_type, config.agent_worker_command
        ),
    })
}
