//! Request and response types for the token service.

use serde::{Deserialize, Serialize};

/// Default agent type tag for dispatch requests.
pub const DEFAULT_AGENT_TYPE: &str = "translation";

/// Default languages handed to the agent.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["English", "Hindi"];

// ============================================================================
// Token issuance
// ============================================================================

/// Raw query string of `GET /token`.
///
/// Both fields are optional at the extractor level so a missing parameter
/// surfaces as a `BAD_REQUEST` error body rather than a bare rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenQuery {
    pub room: Option<String>,
    pub identity: Option<String>,
}

/// Validated token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub room: String,
    pub identity: String,
}

impl TokenQuery {
    /// Validate presence of both fields.
    ///
    /// Content is not otherwise inspected.
    pub fn into_request(self) -> Result<TokenRequest, &'static str> {
        let room = self
            .room
            .filter(|r| !r.is_empty())
            .ok_or("room is required")?;
        let identity = self
            .identity
            .filter(|i| !i.is_empty())
            .ok_or("identity is required")?;

        Ok(TokenRequest { room, identity })
    }
}

/// Response body of `GET /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed room token.
    pub token: String,

    /// Media server URL, passed through from configuration.
    pub url: String,

    pub room: String,
    pub identity: String,
}

// ============================================================================
// Agent dispatch
// ============================================================================

/// Request body of `POST /dispatch-agent`.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    /// Room the agent should join.
    pub room: String,

    /// Media server URL the client believes the worker uses. Optional and
    /// passed through unchecked.
    #[serde(default, alias = "livekit_url")]
    pub server_url: String,

    #[serde(default = "default_agent_type")]
    pub agent_type: String,

    /// Languages handed to the agent, order preserved.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

fn default_agent_type() -> String {
    DEFAULT_AGENT_TYPE.to_string()
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

impl DispatchRequest {
    /// Validate request fields.
    ///
    /// Only the room is checked; agent type and languages pass through.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.room.is_empty() {
            return Err("room is required");
        }
        Ok(())
    }
}

/// Response body of `POST /dispatch-agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchAcknowledgment {
    pub success: bool,
    pub message: String,
    pub room: String,
    pub languages: Vec<String>,
    pub note: String,
}

// ============================================================================
// Health
// ============================================================================

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: String,

    /// Key id and secret are both configured.
    pub signing_configured: bool,

    /// Media server URL is configured.
    pub media_url_configured: bool,
}
