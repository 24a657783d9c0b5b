//! # Dinolab Models
//!
//! Domain models and DTOs for the Dinolab auth service.
//!
//! - [`users`]: user records as held by an identity store
//! - [`auth`]: registration and login requests, and the response envelope
//!
//! # Example
//!
//! ```ignore
//! use dinolab_models::auth::{AuthResponse, RegisterRequest};
//! use validator::Validate;
//!
//! let request = RegisterRequest {
//!     email: "a@x.com".to_string(),
//!     username: "alice".to_string(),
//!     password: "P@ssw0rd!".to_string(),
//! };
//! assert!(request.validate().is_ok());
//! ```

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, validation_messages};
pub use users::{DEFAULT_ROLE, NewUser, User, UserId};
