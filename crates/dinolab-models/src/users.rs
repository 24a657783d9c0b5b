//! User domain models.
//!
//! A [`User`] is the public part of an account. Password material never
//! appears here; identity stores keep credentials to themselves.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dinolab_auth::ClaimSet;

/// Role assigned to every newly registered account.
pub const DEFAULT_ROLE: &str = "User";

/// Opaque, unique user identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new random ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account as held by an identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    /// Builds the claim set for a token issued to this user.
    ///
    /// `roles` should come straight from the identity store; their order is kept.
    pub fn claim_set(&self, roles: Vec<String>) -> ClaimSet {
        ClaimSet::new(
            self.id.to_string(),
            self.username.as_str(),
            self.email.as_str(),
            roles,
        )
    }
}

/// Data for an account that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_claim_set_carries_identity() {
        let user = alice();
        let claims = user.claim_set(vec![DEFAULT_ROLE.to_string()]);
        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.roles, vec!["User"]);
    }

    #[test]
    fn test_claim_set_keeps_role_order() {
        let claims = alice().claim_set(vec!["User".to_string(), "Admin".to_string()]);
        assert_eq!(claims.roles, vec!["User", "Admin"]);
    }

    #[test]
    fn test_claim_set_without_roles() {
        let claims = alice().claim_set(vec![]);
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn test_user_id_serializes_as_plain_uuid() {
        let id = UserId::from_uuid(Uuid::nil());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""00000000-0000-0000-0000-000000000000""#
        );
    }
}
