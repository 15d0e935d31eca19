//! Secret types for protecting signing material from accidental logging.
//!
//! Re-exports [`secrecy`] so the issuer and verifiers share one wrapper for
//! the HMAC signing secret and any other credential loaded from the
//! environment.
//!
//! `SecretString` and `SecretBox<T>` implement `Debug` with redaction, so a
//! struct deriving `Debug` over a secret field logs safely through `{:?}` and
//! `tracing`. Secrets are zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct SigningConfig {
//!     key_id: String,
//!     secret: SecretString,
//! }
//!
//! let config = SigningConfig {
//!     key_id: "K1".to_string(),
//!     secret: SecretString::from("S1"),
//! };
//!
//! assert!(!format!("{config:?}").contains("S1"));
//!
//! // Signing code reads the bytes explicitly.
//! let bytes: &[u8] = config.secret.expose_secret().as_bytes();
//! assert_eq!(bytes, b"S1");
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
