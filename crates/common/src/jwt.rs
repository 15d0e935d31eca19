//! Room access token contract shared by the issuer and by verifiers.
//!
//! This module defines the claims layout of a room access token and the
//! verification rules any holder of the signing credentials can apply:
//! - Size limits for DoS prevention
//! - Clock skew constants for iat validation
//! - Token lifetime bounds (finite, at most 24 hours)
//! - Key ID extraction from JWT headers
//! - Full HS256 verification (`verify_room_token`)
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Only HS256 is accepted; the key id travels as `iss` and as the `kid` header
//! - Generic error messages prevent information leakage
//! - `sub` and `name` are redacted in Debug output
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::jwt::verify_room_token;
//!
//! let claims = verify_room_token(token, "K1", b"S1")?;
//! assert!(claims.grants_room_join("room-42"));
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// JWTs larger than this size are rejected BEFORE any parsing or cryptographic
/// operations. A room token is typically 350-450 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Default JWT clock skew tolerance (5 minutes).
///
/// Tokens with `iat` (issued-at) timestamps more than this amount in the
/// future are rejected.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(300);

/// Maximum allowed JWT clock skew tolerance (10 minutes).
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(600);

/// Default validity window of an issued room token (6 hours).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Upper bound on the validity window of any room token (24 hours).
///
/// Issuers refuse to configure a longer lifetime and verifiers reject tokens
/// whose `exp - iat` exceeds it.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during room token validation.
///
/// Note: Error messages are intentionally generic to prevent information leakage.
/// Detailed information is logged at debug level for troubleshooting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure or claims layout).
    #[error("The access token is invalid or expired")]
    MalformedToken,

    /// Token is missing required `kid` header.
    #[error("The access token is invalid or expired")]
    MissingKid,

    /// Signature does not match the shared secret.
    #[error("The access token is invalid or expired")]
    InvalidSignature,

    /// Token `iss` or `kid` header is not the expected key id.
    #[error("The access token is invalid or expired")]
    IssuerMismatch,

    /// Token `exp` is in the past.
    #[error("The access token is invalid or expired")]
    Expired,

    /// Token `iat` claim is too far in the future.
    #[error("The access token is invalid or expired")]
    IatTooFarInFuture,

    /// `exp` is not after `iat`, or the window exceeds `MAX_TOKEN_TTL`.
    #[error("The access token is invalid or expired")]
    InvalidValidityWindow,
}

// =============================================================================
// Claims Types
// =============================================================================

/// Capability grants bound to a single room.
///
/// Serialized in the media server's camelCase layout
/// (`roomJoin`, `room`, `canPublish`, `canSubscribe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    /// Permission to join `room`.
    pub room_join: bool,

    /// Room the grants apply to.
    pub room: String,

    /// Permission to publish tracks.
    pub can_publish: bool,

    /// Permission to subscribe to other participants' tracks.
    pub can_subscribe: bool,
}

impl VideoGrant {
    /// Full participant grants (join, publish, subscribe) on `room`.
    #[must_use]
    pub fn participant(room: impl Into<String>) -> Self {
        Self {
            room_join: true,
            room: room.into(),
            can_publish: true,
            can_subscribe: true,
        }
    }
}

/// Room access token claims.
///
/// # Fields
///
/// - `sub`: participant identity
/// - `iss`: signing key id
/// - `name`: display name
/// - `nbf` / `iat` / `exp`: validity window (Unix epoch seconds)
/// - `jti`: unique token id, distinct for every issuance
/// - `video`: room grants
///
/// `sub` and `name` are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomClaims {
    /// Participant identity - redacted in Debug output.
    pub sub: String,

    /// Signing key id.
    pub iss: String,

    /// Display name - redacted in Debug output.
    pub name: String,

    /// Not-before timestamp (Unix epoch seconds).
    pub nbf: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Unique token identifier.
    pub jti: String,

    /// Room grants.
    pub video: VideoGrant,
}

impl fmt::Debug for RoomClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomClaims")
            .field("sub", &"[REDACTED]")
            .field("iss", &self.iss)
            .field("name", &"[REDACTED]")
            .field("nbf", &self.nbf)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("jti", &self.jti)
            .field("video", &self.video)
            .finish()
    }
}

impl RoomClaims {
    /// Participant identity carried in `sub`.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.sub
    }

    /// Whether the token allows joining `room`.
    #[must_use]
    pub fn grants_room_join(&self, room: &str) -> bool {
        self.video.room_join && self.video.room == room
    }

    /// Seconds between issuance and expiry.
    #[must_use]
    pub fn validity_window_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Extract the `kid` (key ID) from a JWT header without verifying the signature.
///
/// [`verify_room_token`] uses it to reject tokens minted under another key
/// before any signature work. A verifier holding several keys can also use it
/// to pick the right secret.
///
/// # Security
///
/// - Token size is checked BEFORE any parsing (denial-of-service prevention)
/// - This function does NOT validate the token signature
///
/// # Errors
///
/// Returns `JwtValidationError` variants:
/// - `TokenTooLarge` - Token exceeds size limit
/// - `MalformedToken` - Token format invalid (wrong structure, bad base64, invalid JSON)
/// - `MissingKid` - Token header missing `kid` field or `kid` is not a string
pub fn extract_kid(token: &str) -> Result<String, JwtValidationError> {
    check_size(token)?;

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    let header_part = parts.first().ok_or(JwtValidationError::MalformedToken)?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT header base64");
        JwtValidationError::MalformedToken
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT header JSON");
        JwtValidationError::MalformedToken
    })?;

    let kid = header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or(JwtValidationError::MissingKid)?;

    Ok(kid)
}

/// Validate the `iat` (issued-at) claim with clock skew tolerance.
fn validate_iat(iat: i64, clock_skew: Duration) -> Result<(), JwtValidationError> {
    let now = chrono::Utc::now().timestamp();
    validate_iat_at(iat, clock_skew, now)
}

/// Deterministic `iat` validation against an explicit `now` timestamp.
fn validate_iat_at(
    iat: i64,
    clock_skew: Duration,
    now: i64,
) -> Result<(), JwtValidationError> {
    // Safe cast: clock_skew is bounded to MAX_CLOCK_SKEW (600 seconds)
    #[allow(clippy::cast_possible_wrap)]
    let clock_skew_secs = clock_skew.as_secs() as i64;
    let max_iat = now + clock_skew_secs;

    if iat > max_iat {
        tracing::debug!(
            target: "common.jwt",
            iat = iat,
            now = now,
            max_allowed = max_iat,
            clock_skew_secs = clock_skew_secs,
            "Token rejected: iat too far in the future"
        );
        return Err(JwtValidationError::IatTooFarInFuture);
    }

    Ok(())
}

/// Verify a room access token with the shared signing credentials.
///
/// Validates, in order:
/// - Token size (must be <= `MAX_JWT_SIZE_BYTES`)
/// - `kid` header present and equal to `key_id`
/// - HS256 signature against `secret`
/// - `iss` equals `key_id`
/// - `exp` and `nbf` (with the library's default leeway)
/// - `iat` not further in the future than `DEFAULT_CLOCK_SKEW`
/// - `iat < exp` and `exp - iat <= MAX_TOKEN_TTL`
///
/// # Errors
///
/// Returns the matching `JwtValidationError` variant; all variants render the
/// same generic message.
pub fn verify_room_token(
    token: &str,
    key_id: &str,
    secret: &[u8],
) -> Result<RoomClaims, JwtValidationError> {
    let kid = extract_kid(token)?;
    if kid != key_id {
        tracing::debug!(target: "common.jwt", "Token rejected: kid does not match key id");
        return Err(JwtValidationError::IssuerMismatch);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.set_issuer(&[key_id]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

    let token_data = decode::<RoomClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| {
            tracing::debug!(target: "common.jwt", error = %e, "Token verification failed");
            match e.kind() {
                ErrorKind::InvalidSignature => JwtValidationError::InvalidSignature,
                ErrorKind::InvalidIssuer => JwtValidationError::IssuerMismatch,
                ErrorKind::ExpiredSignature => JwtValidationError::Expired,
                _ => JwtValidationError::MalformedToken,
            }
        })?;

    let claims = token_data.claims;
    validate_iat(claims.iat, DEFAULT_CLOCK_SKEW)?;
    validate_window(&claims)?;

    Ok(claims)
}

fn check_size(token: &str) -> Result<(), JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }
    Ok(())
}

fn validate_window(claims: &RoomClaims) -> Result<(), JwtValidationError> {
    #[allow(clippy::cast_possible_wrap)]
    let max_window = MAX_TOKEN_TTL.as_secs() as i64;
    let window = claims.validity_window_secs();

    if window <= 0 || window > max_window {
        tracing::debug!(
            target: "common.jwt",
            window_secs = window,
            max_window_secs = max_window,
            "Token rejected: validity window out of bounds"
        );
        return Err(JwtValidationError::InvalidValidityWindow);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const KEY_ID: &str = "K1";
    const SECRET: &[u8] = b"S1";

    fn claims_at(now: i64, ttl: i64) -> RoomClaims {
        RoomClaims {
            sub: "alice".to_string(),
            iss: KEY_ID.to_string(),
            name: "alice".to_string(),
            nbf: now,
            iat: now,
            exp: now + ttl,
            jti: "jti-1".to_string(),
            video: VideoGrant::participant("room-42"),
        }
    }

    fn sign(claims: &RoomClaims, secret: &[u8]) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(claims.iss.clone());
        encode(&header, claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    // -------------------------------------------------------------------------
    // Constants Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_max_jwt_size_is_8kb() {
        assert_eq!(MAX_JWT_SIZE_BYTES, 8192);
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert_eq!(DEFAULT_TOKEN_TTL, Duration::from_secs(21_600));
        assert_eq!(MAX_TOKEN_TTL, Duration::from_secs(86_400));
        assert!(DEFAULT_TOKEN_TTL < MAX_TOKEN_TTL);
    }

    #[test]
    fn test_default_clock_skew_within_max() {
        assert!(DEFAULT_CLOCK_SKEW <= MAX_CLOCK_SKEW);
    }

    // -------------------------------------------------------------------------
    // Claims Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_video_grant_serializes_camel_case() {
        let json = serde_json::to_value(VideoGrant::participant("room-42")).unwrap();

        assert_eq!(json["roomJoin"], true);
        assert_eq!(json["room"], "room-42");
        assert_eq!(json["canPublish"], true);
        assert_eq!(json["canSubscribe"], true);
    }

    #[test]
    fn test_room_claims_debug_redacts_identity() {
        let claims = claims_at(1_700_000_000, 3600);
        let debug_str = format!("{claims:?}");

        assert!(!debug_str.contains("alice"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("room-42"));
    }

    #[test]
    fn test_grants_room_join_is_room_scoped() {
        let claims = claims_at(1_700_000_000, 3600);

        assert!(claims.grants_room_join("room-42"));
        assert!(!claims.grants_room_join("room-43"));

        let mut no_join = claims.clone();
        no_join.video.room_join = false;
        assert!(!no_join.grants_room_join("room-42"));
    }

    // -------------------------------------------------------------------------
    // extract_kid Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_extract_kid_from_signed_token() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&claims_at(now, 3600), SECRET);

        assert_eq!(extract_kid(&token).unwrap(), KEY_ID);
    }

    #[test]
    fn test_extract_kid_missing_kid() {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MissingKid)));
    }

    #[test]
    fn test_extract_kid_malformed_token() {
        let result = extract_kid("not-a-jwt");
        assert!(matches!(result, Err(JwtValidationError::MalformedToken)));
    }

    #[test]
    fn test_extract_kid_invalid_json() {
        let header_b64 = URL_SAFE_NO_PAD.encode("not-json");
        let token = format!("{header_b64}.payload.signature");

        let result = extract_kid(&token);
        assert!(matches!(result, Err(JwtValidationError::MalformedToken)));
    }

    #[test]
    fn test_extract_kid_oversized_token() {
        let oversized = "a".repeat(MAX_JWT_SIZE_BYTES + 1);
        let result = extract_kid(&oversized);
        assert!(matches!(result, Err(JwtValidationError::TokenTooLarge)));
    }

    // -------------------------------------------------------------------------
    // validate_iat Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_validate_iat_past_time() {
        let past = chrono::Utc::now().timestamp() - 3600;
        assert!(validate_iat(past, DEFAULT_CLOCK_SKEW).is_ok());
    }

    #[test]
    fn test_validate_iat_at_boundary_exact() {
        let now = 1_700_000_000_i64;

        assert!(validate_iat_at(now + 300, DEFAULT_CLOCK_SKEW, now).is_ok());
        assert!(matches!(
            validate_iat_at(now + 301, DEFAULT_CLOCK_SKEW, now),
            Err(JwtValidationError::IatTooFarInFuture)
        ));
    }

    // -------------------------------------------------------------------------
    // verify_room_token Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_verify_accepts_valid_token() {
        let now = chrono::Utc::now().timestamp();
        let claims = claims_at(now, 3600);
        let token = sign(&claims, SECRET);

        let verified = verify_room_token(&token, KEY_ID, SECRET).unwrap();
        assert_eq!(verified, claims);
        assert_eq!(verified.identity(), "alice");
        assert!(verified.grants_room_join("room-42"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&claims_at(now, 3600), SECRET);

        let result = verify_room_token(&token, KEY_ID, b"other-secret");
        assert_eq!(result, Err(JwtValidationError::InvalidSignature));
    }

    #[test]
    fn test_verify_rejects_wrong_issuer() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&claims_at(now, 3600), SECRET);

        let result = verify_room_token(&token, "K2", SECRET);
        assert_eq!(result, Err(JwtValidationError::IssuerMismatch));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&claims_at(now - 7200, 3600), SECRET);

        let result = verify_room_token(&token, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::Expired));
    }

    #[test]
    fn test_verify_rejects_window_above_max() {
        let now = chrono::Utc::now().timestamp();
        let too_long = MAX_TOKEN_TTL.as_secs() as i64 + 1;
        let token = sign(&claims_at(now, too_long), SECRET);

        let result = verify_room_token(&token, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::InvalidValidityWindow));
    }

    #[test]
    fn test_verify_rejects_iat_in_future() {
        let now = chrono::Utc::now().timestamp();
        let mut claims = claims_at(now, 3600);
        claims.iat = now + DEFAULT_CLOCK_SKEW.as_secs() as i64 + 60;
        let token = sign(&claims, SECRET);

        let result = verify_room_token(&token, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::IatTooFarInFuture));
    }

    #[test]
    fn test_verify_rejects_token_without_kid() {
        let now = chrono::Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims_at(now, 3600),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = verify_room_token(&token, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::MissingKid));
    }

    #[test]
    fn test_verify_rejects_kid_not_matching_key_id() {
        let now = chrono::Utc::now().timestamp();
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some("K2".to_string());
        let token = encode(&header, &claims_at(now, 3600), &EncodingKey::from_secret(SECRET))
            .unwrap();

        let result = verify_room_token(&token, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::IssuerMismatch));
    }

    #[test]
    fn test_verify_rejects_oversized_token() {
        let oversized = "a".repeat(MAX_JWT_SIZE_BYTES + 1);
        let result = verify_room_token(&oversized, KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::TokenTooLarge));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let result = verify_room_token("a.b.c", KEY_ID, SECRET);
        assert_eq!(result, Err(JwtValidationError::MalformedToken));
    }

    #[test]
    fn test_error_messages_are_generic() {
        let errors = [
            JwtValidationError::InvalidSignature,
            JwtValidationError::IssuerMismatch,
            JwtValidationError::Expired,
            JwtValidationError::InvalidValidityWindow,
        ];
        for error in errors {
            assert_eq!(error.to_string(), "The access token is invalid or expired");
        }
    }
}
