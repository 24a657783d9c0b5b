//! # Dinolab Core
//!
//! Core types, errors, and utilities shared by the Dinolab auth crates.
//!
//! - [`errors`]: the error taxonomy for registration, login, token verification and configuration
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use dinolab_core::errors::{AuthError, TokenRejection};
//! use dinolab_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("P@ssw0rd!")?;
//! assert!(verify_password("P@ssw0rd!", &hash)?);
//!
//! let err = AuthError::from(TokenRejection::Expired);
//! assert!(!err.is_server_error());
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AuthError, ConfigError, StoreError, TokenRejection};
pub use password::{hash_password, hash_password_with_cost, verify_password};
