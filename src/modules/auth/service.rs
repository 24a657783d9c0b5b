use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use dinolab_auth::{ClaimSet, TokenIssuer, TokenVerifier};
use dinolab_config::JwtConfig;
use dinolab_core::{AuthError, ConfigError, TokenRejection};
use dinolab_models::{
    DEFAULT_ROLE, LoginRequest, NewUser, RegisterRequest, User, validation_messages,
};
use dinolab_observability::{
    track_login_failure, track_login_success, track_registration_failure, track_token_issued,
    track_token_rejected, track_user_registered,
};

use crate::identity::IdentityStore;

/// Registration and login flows on top of an identity store.
///
/// Holds no mutable state of its own; share it behind an `Arc`.
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthService {
    pub fn new(store: Arc<dyn IdentityStore>, jwt_config: &JwtConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            issuer: TokenIssuer::new(jwt_config)?,
            verifier: TokenVerifier::new(jwt_config)?,
        })
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Registers a new account with the default role and returns its first token.
    #[instrument(skip(self, dto), fields(email = %dto.email, username = %dto.username))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<String, AuthError> {
        let result = self.register_user(dto).await;
        match &result {
            Ok(_) => {
                track_user_registered();
                track_token_issued();
                info!("User registered");
            }
            Err(e) if e.is_server_error() => {
                track_registration_failure(e.reason());
                warn!(reason = e.reason(), error = %e, "Registration failed");
            }
            Err(e) => {
                track_registration_failure(e.reason());
                info!(reason = e.reason(), "Registration refused");
            }
        }
        result
    }

    async fn register_user(&self, dto: RegisterRequest) -> Result<String, AuthError> {
        dto.validate()
            .map_err(|errors| AuthError::InvalidPayload(validation_messages(&errors)))?;

        if self.store.find_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if self.store.find_by_username(&dto.username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        // The store re-checks uniqueness; a concurrent registration that slipped
        // past the lookups above surfaces here as EmailTaken/UsernameTaken.
        let user = self
            .store
            .create_user(NewUser::new(dto.username, dto.email), &dto.password)
            .await?;

        match self.grant_default_role(&user).await {
            Ok(token) => Ok(token),
            Err(e) => {
                // Registration leaves no account behind unless a token was issued.
                if let Err(undo) = self.store.delete_user(&user).await {
                    warn!(user_id = %user.id, error = %undo, "Failed to remove partial account");
                }
                Err(e)
            }
        }
    }

    async fn grant_default_role(&self, user: &User) -> Result<String, AuthError> {
        self.store.add_role(user, DEFAULT_ROLE).await?;
        self.issue_for(user).await
    }

    /// Authenticates by email and password and returns a fresh token.
    ///
    /// Unknown email and wrong password both yield [`AuthError::InvalidCredentials`]
    /// after the same password-hashing work.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<String, AuthError> {
        let result = self.login_user(dto).await;
        match &result {
            Ok(_) => {
                track_login_success();
                track_token_issued();
                info!("User logged in");
            }
            Err(e) => {
                track_login_failure(e.reason());
                info!(reason = e.reason(), "Login refused");
            }
        }
        result
    }

    async fn login_user(&self, dto: LoginRequest) -> Result<String, AuthError> {
        dto.validate()
            .map_err(|errors| AuthError::InvalidPayload(validation_messages(&errors)))?;

        let Some(user) = self.store.find_by_email(&dto.email).await? else {
            self.store.check_absent_password(&dto.password).await;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.store.check_password(&user, &dto.password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_for(&user).await
    }

    /// Verifies a bearer token presented by a client.
    pub fn authenticate(&self, token: &str) -> Result<ClaimSet, TokenRejection> {
        self.verifier.verify(token).inspect_err(|rejection| {
            track_token_rejected(rejection.as_str());
        })
    }

    async fn issue_for(&self, user: &User) -> Result<String, AuthError> {
        let roles = self.store.roles_of(user).await?;
        let claims = user.claim_set(roles);
        self.issuer.issue(&claims)
    }
}
