use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use dinolab_core::StoreError;
use dinolab_core::password::{DEFAULT_HASH_COST, hash_password_with_cost, verify_password};
use dinolab_models::{NewUser, User, UserId};

use super::IdentityStore;

/// Characters allowed in usernames besides ASCII letters and digits.
const USERNAME_EXTRA_CHARS: &str = "-._@+";

/// Hashed once per store and compared against when the account does not exist.
const ABSENT_ACCOUNT_PASSWORD: &str = "absent-account-placeholder";

/// Password rules checked on account creation. Every violated rule is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Accepts any non-empty password.
    pub fn permissive() -> Self {
        Self {
            required_length: 1,
            require_digit: false,
            require_lowercase: false,
            require_uppercase: false,
            require_non_alphanumeric: false,
        }
    }

    pub fn violations(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < self.required_length {
            errors.push(format!(
                "Passwords must be at least {} characters.",
                self.required_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
            errors.push("Passwords must have at least one non alphanumeric character.".to_string());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }

        errors
    }
}

fn username_violation(username: &str) -> Option<String> {
    let valid = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || USERNAME_EXTRA_CHARS.contains(c));

    (!valid).then(|| {
        format!(
            "Username '{}' is invalid, can only contain letters or digits.",
            username
        )
    })
}

/// Lookup key for emails and usernames. Uniqueness is case-insensitive.
fn normalize(value: &str) -> String {
    value.to_lowercase()
}

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
    roles: Vec<String>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, StoredUser>,
    by_email: HashMap<String, UserId>,
    by_username: HashMap<String, UserId>,
}

/// Identity store kept in process memory.
///
/// Uniqueness checks and insertion happen under one write lock, so concurrent
/// registrations for the same email or username cannot both succeed.
#[derive(Debug)]
pub struct InMemoryIdentityStore {
    inner: RwLock<Inner>,
    policy: PasswordPolicy,
    hash_cost: u32,
    absent_hash: OnceLock<String>,
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            policy: PasswordPolicy::default(),
            hash_cost: DEFAULT_HASH_COST,
            absent_hash: OnceLock::new(),
        }
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the bcrypt cost. Low costs are only meant for tests.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self.absent_hash = OnceLock::new();
        self
    }

    /// Placeholder hash computed with the store's cost on first use.
    fn absent_hash(&self) -> &str {
        self.absent_hash.get_or_init(|| {
            hash_password_with_cost(ABSENT_ACCOUNT_PASSWORD, self.hash_cost).unwrap_or_default()
        })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(&normalize(email))
            .and_then(|id| inner.users.get(id))
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_username
            .get(&normalize(username))
            .and_then(|id| inner.users.get(id))
            .map(|stored| stored.user.clone()))
    }

    #[instrument(skip(self, password), fields(username = %new_user.username))]
    async fn create_user(&self, new_user: NewUser, password: &str) -> Result<User, StoreError> {
        let mut errors: Vec<String> = username_violation(&new_user.username).into_iter().collect();
        errors.extend(self.policy.violations(password));
        if !errors.is_empty() {
            return Err(StoreError::Rejected(errors));
        }

        // Hash before taking the lock.
        let password_hash = hash_password_with_cost(password, self.hash_cost)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let email_key = normalize(&new_user.email);
        let username_key = normalize(&new_user.username);

        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&email_key) {
            return Err(StoreError::DuplicateEmail);
        }
        if inner.by_username.contains_key(&username_key) {
            return Err(StoreError::DuplicateUsername);
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username,
            email: new_user.email,
        };
        inner.by_email.insert(email_key, user.id);
        inner.by_username.insert(username_key, user.id);
        inner.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash,
                roles: Vec::new(),
            },
        );

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, StoreError> {
        let password_hash = {
            let inner = self.inner.read().await;
            inner
                .users
                .get(&user.id)
                .map(|stored| stored.password_hash.clone())
                .ok_or(StoreError::UserNotFound)?
        };

        verify_password(password, &password_hash)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn check_absent_password(&self, password: &str) {
        // Outcome is irrelevant; only the work matters.
        let _ = verify_password(password, self.absent_hash());
    }

    async fn roles_of(&self, user: &User) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&user.id)
            .map(|stored| stored.roles.clone())
            .ok_or(StoreError::UserNotFound)
    }

    async fn add_role(&self, user: &User, role: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner.users.get_mut(&user.id).ok_or(StoreError::UserNotFound)?;
        if !stored.roles.iter().any(|r| r == role) {
            stored.roles.push(role.to_string());
        }
        Ok(())
    }

    async fn delete_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner.users.remove(&user.id).ok_or(StoreError::UserNotFound)?;
        inner.by_email.remove(&normalize(&stored.user.email));
        inner.by_username.remove(&normalize(&stored.user.username));

        debug!(user_id = %user.id, "User deleted");
        Ok(())
    }
}
