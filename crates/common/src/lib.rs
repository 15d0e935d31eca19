//! Types shared between the room token issuer and token verifiers.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for room token claims, constants and verification
pub mod jwt;
