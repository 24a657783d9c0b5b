//! Session token issuance and verification.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, base64url
//! without padding) signed with HMAC under the shared secret from
//! [`JwtConfig`]. The algorithm is fixed per deployment: the issuer always
//! signs with it and the verifier accepts nothing else.
//!
//! # Verification order
//!
//! 1. split and parse the header, else [`TokenRejection::Malformed`]
//! 2. compare the header's algorithm tag with the configured one, else
//!    [`TokenRejection::UnsupportedAlgorithm`]
//! 3. check the signature in constant time, else [`TokenRejection::BadSignature`]
//! 4. decode the payload, else [`TokenRejection::Malformed`]
//! 5. reject with [`TokenRejection::Expired`] when `now >= exp`
//!
//! # Example
//!
//! ```ignore
//! use dinolab_auth::{ClaimSet, TokenIssuer, TokenVerifier};
//! use dinolab_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let issuer = TokenIssuer::new(&config)?;
//! let verifier = TokenVerifier::new(&config)?;
//!
//! let claims = ClaimSet::new(user_id, "alice", "a@x.com", ["User"]);
//! let token = issuer.issue(&claims)?;
//! assert_eq!(verifier.verify(&token)?, claims);
//! ```

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use data_encoding::BASE64URL_NOPAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;
use tracing::{debug, warn};

use dinolab_config::JwtConfig;
use dinolab_core::{AuthError, ConfigError, TokenRejection};

use crate::claims::{ClaimSet, SessionClaims};

/// Signs claim sets into session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer, validating the configuration first.
    ///
    /// An empty or short secret is rejected here so the process fails at
    /// startup instead of on the first request.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`JwtConfig::validate`].
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            algorithm: config.algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.token_ttl,
        })
    }

    /// The signing algorithm written into every token header.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token valid from now until now + TTL.
    ///
    /// # Arguments
    ///
    /// * `claims` - The claim set to bind; its `token_id` becomes the `jti`
    ///
    /// # Returns
    ///
    /// Returns the compact `header.payload.signature` string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if encoding fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let claims = user.claim_set(roles);
    /// let token = issuer.issue(&claims)?;
    /// ```
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, AuthError> {
        self.issue_at(claims, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// `iat` is `now` and `exp` is `now + ttl`, both in whole Unix seconds.
    pub fn issue_at(&self, claims: &ClaimSet, now: DateTime<Utc>) -> Result<String, AuthError> {
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| AuthError::internal("Token lifetime exceeds the timestamp range"))?;
        let iat = now.timestamp();
        let exp = iat.saturating_add(ttl);
        let payload = SessionClaims::new(claims.clone(), iat, exp);

        let token = encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to create token: {}", e)))?;

        debug!(
            token_id = %claims.token_id,
            subject = %claims.subject,
            expires_at = exp,
            "Issued session token"
        );

        Ok(token)
    }
}

/// Validates session tokens and yields their claim sets.
#[derive(Clone)]
pub struct TokenVerifier {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier that accepts only the configured algorithm.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`JwtConfig::validate`].
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut validation = Validation::new(config.algorithm);
        // Expiry is checked against an explicit clock in `decode_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            algorithm: config.algorithm,
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Verifies a token against the current time and returns its claim set.
    ///
    /// # Arguments
    ///
    /// * `token` - The compact token string presented by the client
    ///
    /// # Returns
    ///
    /// Returns the [`ClaimSet`] bound at issuance, roles in their original order.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenRejection`] if:
    /// - The token is not three base64url segments with a JSON header
    ///   ([`TokenRejection::Malformed`])
    /// - The header names any algorithm other than the configured one
    ///   ([`TokenRejection::UnsupportedAlgorithm`])
    /// - The signature does not match ([`TokenRejection::BadSignature`])
    /// - The payload is not a valid claim set ([`TokenRejection::Malformed`])
    /// - The current time is at or past `exp` ([`TokenRejection::Expired`])
    ///
    /// # Example
    ///
    /// ```ignore
    /// let claims = verifier.verify(&token)?;
    /// println!("Subject: {}", claims.subject);
    /// ```
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenRejection> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenRejection> {
        self.decode_at(token, now).map(SessionClaims::into_claim_set)
    }

    /// Verifies a token and returns the full payload, timestamps included.
    pub fn decode_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, TokenRejection> {
        let result = self.check(token, now);
        if let Err(rejection) = &result {
            warn!(reason = rejection.as_str(), "Session token rejected");
        }
        result
    }

    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenRejection> {
        let tag = read_algorithm_tag(token)?;
        match Algorithm::from_str(&tag) {
            Ok(algorithm) if algorithm == self.algorithm => {}
            _ => return Err(TokenRejection::UnsupportedAlgorithm),
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| rejection_for(e.kind()))?;

        if claims.is_expired_at(now.timestamp()) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Reads the `alg` field of the header without trusting anything else.
fn read_algorithm_tag(token: &str) -> Result<String, TokenRejection> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenRejection::Malformed);
    };

    let bytes = BASE64URL_NOPAD
        .decode(header.as_bytes())
        .map_err(|_| TokenRejection::Malformed)?;
    let header: RawHeader =
        serde_json::from_slice(&bytes).map_err(|_| TokenRejection::Malformed)?;

    Ok(header.alg)
}

fn rejection_for(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature => TokenRejection::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::UnsupportedAlgorithm
        }
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    }
}
