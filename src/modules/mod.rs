//! Feature modules.
//!
//! - [`auth`]: registration, login, and token authentication

pub mod auth;
