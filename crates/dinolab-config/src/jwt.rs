//! Token signing configuration.
//!
//! Loaded once at startup. A missing or weak secret is a [`ConfigError`], never
//! a per-request failure.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `JWT_SECRET` | (required) | shared HMAC key |
//! | `JWT_ALGORITHM` | `HS512` | one of `HS256`, `HS384`, `HS512` |
//! | `JWT_TTL_SECS` | `1200` | token lifetime in seconds |

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use dinolab_core::ConfigError;

pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS512;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(20 * 60);

/// Shared secret used for both signing and verification.
///
/// `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<redacted, {} bytes>)", self.0.len())
    }
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: SecretKey,
    /// The single algorithm this deployment signs with and accepts.
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
}

impl JwtConfig {
    /// Builds a validated configuration.
    pub fn new(
        secret: impl Into<String>,
        algorithm: Algorithm,
        token_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            secret: SecretKey::new(secret),
            algorithm,
            token_ttl,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a validated configuration with the default algorithm and TTL.
    pub fn with_secret(secret: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(secret, DEFAULT_ALGORITHM, DEFAULT_TOKEN_TTL)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(name) => parse_algorithm(&name)?,
            None => DEFAULT_ALGORITHM,
        };

        let token_ttl = match lookup("JWT_TTL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "JWT_TTL_SECS".to_string(),
                        value: raw,
                    });
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Self::new(secret, algorithm, token_ttl)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let min_bytes = min_secret_len(self.algorithm)?;
        if self.secret.len() < min_bytes {
            return Err(ConfigError::WeakSecret {
                algorithm: format!("{:?}", self.algorithm),
                min_bytes,
                actual: self.secret.len(),
            });
        }

        // Expiry is carried in whole seconds as a signed Unix timestamp.
        let secs = self.token_ttl.as_secs();
        if secs == 0 || i64::try_from(secs).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_SECS".to_string(),
                value: format!("{:?}", self.token_ttl),
            });
        }

        Ok(())
    }
}

/// Only the HMAC family is accepted.
fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| ConfigError::UnsupportedAlgorithm(name.to_string()))?;
    min_secret_len(algorithm)?;
    Ok(algorithm)
}

/// HMAC keys must be at least as long as the hash output (RFC 7518, 3.2).
fn min_secret_len(algorithm: Algorithm) -> Result<usize, ConfigError> {
    match algorithm {
        Algorithm::HS256 => Ok(32),
        Algorithm::HS384 => Ok(48),
        Algorithm::HS512 => Ok(64),
        other => Err(ConfigError::UnsupportedAlgorithm(format!("{:?}", other))),
    }
}
