//! # Token Service Test Utilities
//!
//! This crate provides:
//! - Server test harness (`TestTokenServer` for E2E tests)
//! - Configuration fixtures (fixed key id, secret and media URL)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<()> {
//!     let server = TestTokenServer::spawn(configured_vars()).await?;
//!
//!     let response = reqwest::get(format!(
//!         "{}/token?room=room-42&identity=alice",
//!         server.url()
//!     ))
//!     .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use fixtures::*;
pub use server_harness::*;
