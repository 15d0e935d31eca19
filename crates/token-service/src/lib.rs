//! Room Token Service Library
//!
//! Issues short-lived access tokens for joining a real-time media room and
//! acknowledges requests to dispatch an automated participant into a room.
//!
//! # Architecture
//!
//! The service follows the Handler -> Service pattern. It holds no state
//! beyond the immutable configuration loaded at startup:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> crypto/mod.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `crypto` - HS256 signing of room tokens
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP metrics middleware
//! - `models` - Request and response types
//! - `observability` - Metrics and log correlation helpers
//! - `routes` - Axum router setup
//! - `services` - Token issuance and dispatch acknowledgment

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
