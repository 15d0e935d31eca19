//! Observability module for the token service.
//!
//! # Privacy by Default
//!
//! Handlers use `#[instrument(skip_all)]` and add fields explicitly:
//! - **SAFE**: operation names, statuses, error categories
//! - **HASHED**: participant identities and room names (`hash_for_correlation`)
//! - **NEVER**: signing secrets and issued tokens

pub mod metrics;

use crate::errors::TokenServiceError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// This is a one-way hash for correlation only, not a secret-protection
/// primitive.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let mut encoded = hex::encode(hasher.finalize());
    // 8 hex chars (32 bits)
    encoded.truncate(8);
    encoded
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Credentials or media URL not configured
    Configuration,
    /// Malformed or incomplete request
    Validation,
    /// Signing failures
    Cryptographic,
    /// Anything else
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Cryptographic => "cryptographic",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&TokenServiceError> for ErrorCategory {
    fn from(err: &TokenServiceError) -> Self {
        match err {
            TokenServiceError::Configuration(_) => ErrorCategory::Configuration,
            TokenServiceError::BadRequest(_) => ErrorCategory::Validation,
            TokenServiceError::Crypto(_) => ErrorCategory::Cryptographic,
            TokenServiceError::Internal(_) => ErrorCategory::Internal,
        }
    }
}
