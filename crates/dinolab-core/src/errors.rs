//! Error taxonomy for the auth service.
//!
//! Errors are split by the layer that produces them:
//!
//! - [`TokenRejection`]: why the verifier refused a bearer token
//! - [`ConfigError`]: invalid or missing configuration, fatal at startup
//! - [`StoreError`]: failures reported by an identity store implementation
//! - [`AuthError`]: outcomes of the registration and login flows
//!
//! Rejections and flow failures are ordinary values. Callers turn them into
//! structured responses; nothing here is meant to unwind across the trust boundary.

use std::fmt;

/// Message returned for every credential failure during login.
///
/// Unknown email and wrong password must be indistinguishable to the caller.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Reason a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TokenRejection {
    /// The token could not be parsed into header, payload and signature.
    #[error("Malformed token")]
    Malformed,
    /// The signature does not match the payload under the configured key.
    #[error("Invalid token signature")]
    BadSignature,
    /// The token is at or past its expiry instant.
    #[error("Token has expired")]
    Expired,
    /// The header names an algorithm this deployment does not accept.
    #[error("Unsupported token algorithm")]
    UnsupportedAlgorithm,
}

impl TokenRejection {
    /// Stable label used for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
            Self::UnsupportedAlgorithm => "unsupported_algorithm",
        }
    }
}

/// Configuration errors. These abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT secret is not configured")]
    MissingSecret,
    #[error("JWT secret is too short for {algorithm}: need at least {min_bytes} bytes, got {actual}")]
    WeakSecret {
        algorithm: String,
        min_bytes: usize,
        actual: usize,
    },
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors an identity store may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Another account already uses this email.
    #[error("Email already exists")]
    DuplicateEmail,
    /// Another account already uses this username.
    #[error("Username already exists")]
    DuplicateUsername,
    /// The store refused the account, e.g. because of its password policy.
    #[error("User creation rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
    #[error("User not found")]
    UserNotFound,
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

/// Failure outcomes of the registration and login flows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid payload")]
    InvalidPayload(Vec<String>),
    #[error("Email already exists")]
    EmailTaken,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("User creation failed: {}", .0.join("; "))]
    CreationFailed(Vec<String>),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenRejection),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn internal(message: impl fmt::Display) -> Self {
        Self::Internal(message.to_string())
    }

    /// Whether the failure is the server's fault rather than the client's.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::CreationFailed(_) | Self::Configuration(_) | Self::Internal(_)
        )
    }

    /// HTTP-style status code for the outer transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Token(_) => 401,
            e if e.is_server_error() => 500,
            _ => 400,
        }
    }

    /// Stable label used for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::EmailTaken => "email_taken",
            Self::UsernameTaken => "username_taken",
            Self::CreationFailed(_) => "creation_failed",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Token(rejection) => rejection.as_str(),
            Self::Configuration(_) => "configuration",
            Self::Internal(_) => "internal",
        }
    }

    /// User-visible error messages.
    ///
    /// Internal details are not exposed; `CreationFailed` carries the store's
    /// own descriptions, which are meant for the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidPayload(details) if !details.is_empty() => {
                let mut messages = vec!["Invalid payload".to_string()];
                messages.extend(details.iter().cloned());
                messages
            }
            Self::CreationFailed(details) if !details.is_empty() => details.clone(),
            Self::Configuration(_) | Self::Internal(_) => {
                vec!["Internal server error".to_string()]
            }
            other => vec![other.to_string()],
        }
    }
}

impl From<StoreError> for AuthError {
    /// Maps store failures seen while creating an account.
    ///
    /// Uniqueness violations raised by the store itself (a concurrent
    /// registration won the race after our existence checks) map to the same
    /// outcomes as the pre-checks.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::EmailTaken,
            StoreError::DuplicateUsername => Self::UsernameTaken,
            StoreError::Rejected(details) => Self::CreationFailed(details),
            StoreError::UserNotFound | StoreError::Unavailable(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
