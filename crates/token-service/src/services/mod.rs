//! Business logic behind the HTTP handlers.
//!
//! - `token_issuer` - Builds and signs room tokens
//! - `dispatch` - Acknowledges agent dispatch requests

pub mod dispatch;
pub mod token_issuer;

pub use dispatch::acknowledge_dispatch;
pub use token_issuer::issue_token;
