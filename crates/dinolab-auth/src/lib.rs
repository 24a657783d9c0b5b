//! # Dinolab Auth
//!
//! Session token issuance and verification for the Dinolab auth service.
//!
//! - [`claims`]: the claim set bound to a token and its JWT payload form
//! - [`jwt`]: [`TokenIssuer`] and [`TokenVerifier`]
//!
//! Both halves are built from the same validated `JwtConfig`; they share the
//! secret key and the single accepted signing algorithm.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{ClaimSet, SessionClaims};
pub use jwt::{TokenIssuer, TokenVerifier};
