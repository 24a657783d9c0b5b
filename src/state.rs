use std::sync::Arc;

use dinolab_config::JwtConfig;
use dinolab_core::ConfigError;

use crate::identity::IdentityStore;
use crate::modules::auth::AuthService;

/// Shared application state, cheap to clone across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(jwt_config: JwtConfig, store: Arc<dyn IdentityStore>) -> Result<Self, ConfigError> {
        let auth = AuthService::new(store, &jwt_config)?;
        Ok(Self {
            jwt_config,
            auth: Arc::new(auth),
        })
    }
}

/// Builds the state from environment configuration.
///
/// Fails on a missing or weak secret so the process never starts half-configured.
pub fn init_app_state(store: Arc<dyn IdentityStore>) -> Result<AppState, ConfigError> {
    AppState::new(JwtConfig::from_env()?, store)
}
