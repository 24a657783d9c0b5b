use std::sync::Arc;
use std::time::Duration;

use dinolab::identity::{IdentityStore, InMemoryIdentityStore};
use dinolab::modules::auth::AuthService;
use dinolab_config::JwtConfig;
use dinolab_models::{LoginRequest, RegisterRequest};
use jsonwebtoken::Algorithm;

pub const TEST_SECRET: &str =
    "test_secret_key_for_testing_purposes_it_must_be_sixty_four_bytes_long";
#[allow(dead_code)]
pub const OTHER_SECRET: &str =
    "another_secret_key_for_testing_purposes_also_sixty_four_bytes_long!";

/// Lowest bcrypt cost, keeps the suite fast.
#[allow(dead_code)]
pub const TEST_HASH_COST: u32 = 4;

pub fn get_test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, Algorithm::HS512, Duration::from_secs(1200))
        .expect("test JWT config is valid")
}

#[allow(dead_code)]
pub fn test_store() -> Arc<InMemoryIdentityStore> {
    Arc::new(InMemoryIdentityStore::new().with_hash_cost(TEST_HASH_COST))
}

#[allow(dead_code)]
pub fn test_service() -> AuthService {
    test_service_with_store(test_store())
}

#[allow(dead_code)]
pub fn test_service_with_store(store: Arc<dyn IdentityStore>) -> AuthService {
    AuthService::new(store, &get_test_jwt_config()).expect("test service builds")
}

#[allow(dead_code)]
pub fn register_request(email: &str, username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}
