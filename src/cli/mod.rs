//! Handlers behind the `dinolab` command line.

use anyhow::{Context, bail};
use uuid::Uuid;

use dinolab_auth::ClaimSet;
use dinolab_models::{AuthResponse, LoginRequest, RegisterRequest};

use crate::state::AppState;

/// Issues a token for an identity given on the command line.
///
/// Bypasses the identity store; meant for operators and service-to-service setup.
pub fn issue_token(
    state: &AppState,
    id: Option<String>,
    username: &str,
    email: &str,
    roles: Vec<String>,
) -> anyhow::Result<String> {
    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let claims = ClaimSet::new(id, username, email, roles);
    let token = state.auth.issuer().issue(&claims)?;
    Ok(token)
}

/// Verifies a token and renders its claim set as pretty JSON.
pub fn verify_token(state: &AppState, token: &str) -> anyhow::Result<String> {
    match state.auth.authenticate(token.trim()) {
        Ok(claims) => serde_json::to_string_pretty(&claims).context("Failed to render claims"),
        Err(rejection) => bail!("Token rejected: {}", rejection),
    }
}

/// Walks through registration and login against the state's identity store,
/// printing each response.
///
/// Expects a store where `a@x.com` is not yet registered.
pub async fn run_demo(state: &AppState) -> anyhow::Result<()> {
    let auth = &state.auth;
    println!(
        "algorithm={:?} ttl={}s",
        state.jwt_config.algorithm,
        state.jwt_config.token_ttl.as_secs()
    );

    let steps: Vec<(&str, Result<String, dinolab_core::AuthError>)> = vec![
        (
            "register alice",
            auth.register(RegisterRequest {
                email: "a@x.com".to_string(),
                username: "alice".to_string(),
                password: "P@ssw0rd!".to_string(),
            })
            .await,
        ),
        (
            "register again with the same email",
            auth.register(RegisterRequest {
                email: "a@x.com".to_string(),
                username: "alice2".to_string(),
                password: "P@ssw0rd!".to_string(),
            })
            .await,
        ),
        (
            "login with a wrong password",
            auth.login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await,
        ),
        (
            "login with the right password",
            auth.login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "P@ssw0rd!".to_string(),
            })
            .await,
        ),
    ];

    for (label, result) in steps {
        let verified = result.as_ref().ok().map(|token| auth.authenticate(token));
        let response = AuthResponse::from(result);
        println!("{label}: {}", serde_json::to_string(&response)?);
        if let Some(verified) = verified {
            let claims = verified.context("Freshly issued token failed verification")?;
            println!("  subject={} roles={:?}", claims.subject, claims.roles);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use dinolab_config::JwtConfig;

    use crate::identity::InMemoryIdentityStore;

    const SECRET: &str = "cli_test_secret_that_is_comfortably_longer_than_sixty_four_bytes!!";

    fn state() -> AppState {
        let config = JwtConfig::with_secret(SECRET).unwrap();
        AppState::new(config, Arc::new(InMemoryIdentityStore::new())).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let state = state();
        let token = issue_token(
            &state,
            Some("42".to_string()),
            "ops",
            "ops@x.com",
            vec!["Admin".to_string()],
        )
        .unwrap();

        let rendered = verify_token(&state, &format!("  {token}\n")).unwrap();
        let claims: ClaimSet = serde_json::from_str(&rendered).unwrap();
        assert_eq!(claims.id, "42");
        assert_eq!(claims.subject, "ops");
        assert_eq!(claims.roles, vec!["Admin"]);
    }

    #[test]
    fn test_issue_generates_id_when_missing() {
        let state = state();
        let token = issue_token(&state, None, "ops", "ops@x.com", vec![]).unwrap();
        let claims = state.auth.authenticate(&token).unwrap();
        assert!(Uuid::parse_str(&claims.id).is_ok());
    }

    #[test]
    fn test_verify_reports_rejection() {
        let err = verify_token(&state(), "not-a-token").unwrap_err();
        assert_eq!(err.to_string(), "Token rejected: Malformed token");
    }

    #[tokio::test]
    async fn test_demo_runs() {
        let state = state();
        assert!(run_demo(&state).await.is_ok());
        assert!(
            state
                .auth
                .login(LoginRequest {
                    email: "a@x.com".to_string(),
                    password: "P@ssw0rd!".to_string(),
                })
                .await
                .is_ok()
        );
    }
}
