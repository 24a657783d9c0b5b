//! Identity store interface.
//!
//! The auth flows consume user records through [`IdentityStore`] and never
//! touch credentials directly: hashing, password policy and persistence are the
//! store's business. Any backend (relational, key-value, remote service) can
//! implement it; [`InMemoryIdentityStore`] is the bundled reference backend.
//!
//! Implementations must enforce email and username uniqueness inside
//! [`IdentityStore::create_user`] itself and report violations as
//! [`StoreError::DuplicateEmail`] / [`StoreError::DuplicateUsername`], since two
//! registrations can both pass the service's existence checks.

use async_trait::async_trait;

use dinolab_core::StoreError;
use dinolab_models::{NewUser, User};

pub mod memory;

pub use memory::{InMemoryIdentityStore, PasswordPolicy};

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Creates the account, storing only a hash of `password`.
    async fn create_user(&self, user: NewUser, password: &str) -> Result<User, StoreError>;

    async fn check_password(&self, user: &User, password: &str) -> Result<bool, StoreError>;

    /// Does the work of a failed [`IdentityStore::check_password`] without an
    /// account, so login for an unknown email costs the same as a wrong password.
    async fn check_absent_password(&self, password: &str);

    /// Role names in a stable order.
    async fn roles_of(&self, user: &User) -> Result<Vec<String>, StoreError>;

    async fn add_role(&self, user: &User, role: &str) -> Result<(), StoreError>;

    /// Removes an account. Registration uses it to undo a `create_user` whose
    /// follow-up steps failed.
    async fn delete_user(&self, user: &User) -> Result<(), StoreError>;
}
