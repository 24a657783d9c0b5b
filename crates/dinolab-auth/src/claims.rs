//! Claim structures carried by session tokens.
//!
//! - [`ClaimSet`]: the identity facts bound to one token (what callers authorize against)
//! - [`SessionClaims`]: the signed JWT payload, a claim set plus issued-at and expiry

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dinolab_core::serde::deserialize_one_or_many;

/// Payload name of the user id claim.
pub const ID_CLAIM: &str = "id";
/// Payload name of the subject (username) claim.
pub const SUBJECT_CLAIM: &str = "sub";
pub const EMAIL_CLAIM: &str = "email";
/// Payload name of the unique token id claim.
pub const TOKEN_ID_CLAIM: &str = "jti";
/// Payload name of the role claim. May repeat with distinct values.
pub const ROLE_CLAIM: &str = "role";

/// The facts a token asserts about its bearer.
///
/// Reserved claims are plain fields, so each appears exactly once. Roles keep
/// the order in which the identity store returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// User id
    pub id: String,
    /// Username
    pub subject: String,
    pub email: String,
    /// Freshly generated for every token
    pub token_id: String,
    pub roles: Vec<String>,
}

impl ClaimSet {
    /// Assembles the claims for an authenticated user with a new random token id.
    pub fn new<I, R>(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        roles: I,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            id: id.into(),
            subject: username.into(),
            email: email.into(),
            token_id: Uuid::new_v4().to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Claims as ordered `(name, value)` pairs: reserved claims first, then one
    /// role claim per role.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ID_CLAIM, self.id.as_str()),
            (SUBJECT_CLAIM, self.subject.as_str()),
            (EMAIL_CLAIM, self.email.as_str()),
            (TOKEN_ID_CLAIM, self.token_id.as_str()),
        ]
        .into_iter()
        .chain(self.roles.iter().map(|role| (ROLE_CLAIM, role.as_str())))
    }
}

/// JWT payload for session tokens.
///
/// Timestamps are Unix seconds. Unknown fields are ignored; a repeated
/// reserved field fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: String,
    pub sub: String,
    pub email: String,
    pub jti: String,
    #[serde(
        default,
        deserialize_with = "deserialize_one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub role: Vec<String>,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(claims: ClaimSet, iat: i64, exp: i64) -> Self {
        Self {
            id: claims.id,
            sub: claims.subject,
            email: claims.email,
            jti: claims.token_id,
            role: claims.roles,
            iat,
            exp,
        }
    }

    /// Whether the token is expired at `now` (Unix seconds). Expiry is inclusive.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn into_claim_set(self) -> ClaimSet {
        ClaimSet {
            id: self.id,
            subject: self.sub,
            email: self.email,
            token_id: self.jti,
            roles: self.role,
        }
    }
}
