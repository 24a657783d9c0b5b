//! # Dinolab Config
//!
//! Configuration types for the Dinolab auth service.
//!
//! - [`jwt`]: token signing configuration (secret key, algorithm, time-to-live)
//!
//! # Example
//!
//! ```ignore
//! use dinolab_config::JwtConfig;
//!
//! // Fails loudly when JWT_SECRET is missing or too short for the algorithm
//! let jwt_config = JwtConfig::from_env()?;
//! ```

pub mod jwt;

// Re-export commonly used types at crate root
pub use jwt::{DEFAULT_ALGORITHM, DEFAULT_TOKEN_TTL, JwtConfig, SecretKey};
