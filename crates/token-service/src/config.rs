//! Token service configuration.
//!
//! Configuration is loaded from environment variables once at startup.
//! The signing secret is redacted in Debug output.
//!
//! Missing media server credentials are not a startup error: the service
//! starts, reports the gap on `/health`, and answers credential-dependent
//! requests with a configuration error until it is redeployed.

use crate::crypto::SigningCredentials;
use common::jwt::{DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL};
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Worker invocation advertised in dispatch acknowledgments.
pub const DEFAULT_AGENT_WORKER_COMMAND: &str = "python translation_agent_v2.py dev";

/// Environment variable holding the signing key id.
pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";

/// Environment variable holding the signing secret.
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";

/// Environment variable holding the media server URL returned to clients.
pub const MEDIA_URL_VAR: &str = "LIVEKIT_URL";

/// Token service configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8000").
    pub bind_address: String,

    /// Media server URL handed back with every issued token.
    pub media_url: Option<String>,

    /// Signing key id. Carried as `iss` and as the JWT `kid` header.
    pub signing_key_id: Option<String>,

    /// HMAC signing secret.
    pub signing_secret: Option<SecretString>,

    /// Validity window of issued tokens in seconds (1..=86400).
    pub token_ttl_seconds: i64,

    /// Command operators run to start the agent worker.
    pub agent_worker_command: String,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("media_url", &self.media_url)
            .field("signing_key_id", &self.signing_key_id)
            .field(
                "signing_secret",
                &self.signing_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("agent_worker_command", &self.agent_worker_command)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port configuration: {0}")]
    InvalidPort(String),

    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = if let Some(value_str) = non_empty(vars, "PORT") {
            let value: u16 = value_str.parse().map_err(|e| {
                ConfigError::InvalidPort(format!(
                    "PORT must be a valid port number, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidPort(
                    "PORT must be greater than 0".to_string(),
                ));
            }

            value
        } else {
            DEFAULT_PORT
        };

        let bind_address =
            non_empty(vars, "BIND_ADDRESS").unwrap_or_else(|| format!("0.0.0.0:{}", port));

        // Parse token TTL with validation
        #[allow(clippy::cast_possible_wrap)]
        let max_ttl = MAX_TOKEN_TTL.as_secs() as i64;
        let token_ttl_seconds = if let Some(value_str) = non_empty(vars, "TOKEN_TTL_SECONDS") {
            let value: i64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must be a valid integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value <= 0 {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must be positive, got {}",
                    value
                )));
            }

            if value > max_ttl {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "TOKEN_TTL_SECONDS must not exceed {} seconds, got {}",
                    max_ttl, value
                )));
            }

            value
        } else {
            #[allow(clippy::cast_possible_wrap)]
            let default_ttl = DEFAULT_TOKEN_TTL.as_secs() as i64;
            default_ttl
        };

        let agent_worker_command = non_empty(vars, "AGENT_WORKER_COMMAND")
            .unwrap_or_else(|| DEFAULT_AGENT_WORKER_COMMAND.to_string());

        Ok(Config {
            bind_address,
            media_url: non_empty(vars, MEDIA_URL_VAR),
            signing_key_id: non_empty(vars, API_KEY_VAR),
            signing_secret: non_empty(vars, API_SECRET_VAR).map(SecretString::from),
            token_ttl_seconds,
            agent_worker_command,
        })
    }

    /// Signing key id and secret, if both are configured.
    pub fn signing_credentials(&self) -> Option<SigningCredentials> {
        match (&self.signing_key_id, &self.signing_secret) {
            (Some(key_id), Some(secret)) => Some(SigningCredentials {
                key_id: key_id.clone(),
                secret: secret.clone(),
            }),
            _ => None,
        }
    }

    /// Names of unset variables required for signing.
    pub fn missing_signing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.signing_key_id.is_none() {
            missing.push(API_KEY_VAR);
        }
        if self.signing_secret.is_none() {
            missing.push(API_SECRET_VAR);
        }
        missing
    }

    /// Names of unset variables required for token issuance.
    pub fn missing_token_settings(&self) -> Vec<&'static str> {
        let mut missing = self.missing_signing_settings();
        if self.media_url.is_none() {
            missing.push(MEDIA_URL_VAR);
        }
        missing
    }
}

/// Look up a variable, treating blank values as unset.
fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key).filter(|v| !v.trim().is_empty()).cloned()
}
