//! Room token issuance.
//!
//! Every token grants join, publish and subscribe on exactly one room for
//! the configured validity window. Issuance is stateless; each call carries
//! its own `iat` and a fresh `jti`.

use crate::config::Config;
use crate::crypto::{self, SigningCredentials};
use crate::errors::TokenServiceError;
use crate::models::{TokenRequest, TokenResponse};
use common::jwt::{RoomClaims, VideoGrant};

/// Issue a signed room token for `request.identity` in `request.room`.
///
/// # Errors
///
/// - `Configuration` if the key id, secret or media URL is unset. Checked
///   before any claims are built.
/// - `Crypto` if signing fails.
pub fn issue_token(
    config: &Config,
    request: &TokenRequest,
) -> Result<TokenResponse, TokenServiceError> {
    let (credentials, media_url) = match (config.signing_credentials(), &config.media_url) {
        (Some(credentials), Some(media_url)) => (credentials, media_url),
        _ => {
            return Err(TokenServiceError::Configuration(format!(
                "Media server credentials not configured: {}",
                config.missing_token_settings().join(", ")
            )));
        }
    };

    let now = chrono::Utc::now().timestamp();
    let claims = build_claims(
        &credentials,
        &request.room,
        &request.identity,
        config.token_ttl_seconds,
        now,
    );

    let token = crypto::sign_room_token(&claims, &credentials)?;

    Ok(TokenResponse {
        token,
        url: media_url.clone(),
        room: request.room.clone(),
        identity: request.identity.clone(),
    })
}

/// Build claims for `identity` in `room`, valid from `now` for `ttl_seconds`.
///
/// The identity doubles as the display name.
pub fn build_claims(
    credentials: &SigningCredentials,
    room: &str,
    identity: &str,
    ttl_seconds: i64,
    now: i64,
) -> RoomClaims {
    RoomClaims {
        sub: identity.to_string(),
        iss: credentials.key_id.clone(),
        name: identity.to_string(),
        nbf: now,
        iat: now,
        exp: now + ttl_seconds,
        jti: uuid::Uuid::new_v4().to_string(),
        video: VideoGrant::participant(room),
    }
}
