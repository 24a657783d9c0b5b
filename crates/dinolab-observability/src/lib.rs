//! Dinolab Observability
//!
//! Logging and metrics for the auth service:
//! - console or JSON logging through `tracing-subscriber`
//! - counters for registrations, logins, and token issuance/rejection through the `metrics` facade
//!
//! The library installs no metrics exporter. Counters are no-ops until the
//! embedding process installs a recorder.
//!
//! # Features
//!
//! - `observability` (default): enables the subscriber and the counters. Without it
//!   every function here is a no-op.
//!
//! # Examples
//!
//! ```no_run
//! use dinolab_observability::{init_logging, track_token_issued};
//!
//! init_logging();
//! track_token_issued();
//! ```

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use logging::{LogFormat, init_logging, try_init_logging};
#[cfg(feature = "observability")]
pub use metrics::{
    track_login_failure, track_login_success, track_registration_failure, track_token_issued,
    track_token_rejected, track_user_registered,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// No-op logging initialization when feature disabled
    pub fn init_logging() {}

    /// No-op logging initialization when feature disabled
    pub fn try_init_logging() -> bool {
        false
    }

    // No-op tracking functions
    pub fn track_user_registered() {}
    pub fn track_registration_failure(_reason: &str) {}
    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_token_rejected(_reason: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
