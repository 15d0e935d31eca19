//! Room token signing.
//!
//! Tokens are HS256 JWTs. The key id is written to the `kid` header and is
//! expected in the `iss` claim, so any verifier holding the same key id and
//! secret can check a token offline (see `common::jwt::verify_room_token`).

use crate::errors::TokenServiceError;
use common::jwt::RoomClaims;
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::fmt;
use tracing::instrument;

/// Key id and shared secret used to sign room tokens.
#[derive(Clone)]
pub struct SigningCredentials {
    /// Public key identifier.
    pub key_id: String,

    /// HMAC secret.
    pub secret: SecretString,
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Sign room claims with HS256.
///
/// # Errors
///
/// Returns `TokenServiceError::Crypto` if encoding fails. The underlying
/// error is logged, never returned to the caller.
#[instrument(skip_all)]
pub fn sign_room_token(
    claims: &RoomClaims,
    credentials: &SigningCredentials,
) -> Result<String, TokenServiceError> {
    let encoding_key = EncodingKey::from_secret(credentials.secret.expose_secret().as_bytes());

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    header.kid = Some(credentials.key_id.clone());

    encode(&header, claims, &encoding_key).map_err(|e| {
        tracing::error!(target: "crypto", error = ?e, "Room token signing failed");
        TokenServiceError::Crypto("JWT signing operation failed".to_string())
    })
}
