//! Authentication DTOs.
//!
//! Request shapes for registration and login, and the `{success, token?, errors?}`
//! envelope returned by both flows.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use dinolab_core::AuthError;

/// Registration request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 256, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request with email and password.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response envelope for registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl AuthResponse {
    pub fn success(token: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            errors: None,
        }
    }

    pub fn failure(error: &AuthError) -> Self {
        Self {
            success: false,
            token: None,
            errors: Some(error.messages()),
        }
    }
}

impl From<Result<String, AuthError>> for AuthResponse {
    fn from(result: Result<String, AuthError>) -> Self {
        match result {
            Ok(token) => Self::success(token),
            Err(error) => Self::failure(&error),
        }
    }
}

/// Flattens validator errors into user-facing messages, sorted by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            password: "P@ssw0rd!".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_invalid_fields() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            username: String::new(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec![
                "Email is invalid".to_string(),
                "Password is required".to_string(),
                "Username is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_login_request_invalid_email() {
        let request = LoginRequest {
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_deserialize() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"P@ssw0rd!"}"#).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_success_response_omits_errors() {
        let response = AuthResponse::success("header.payload.signature".to_string());
        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(
            serialized,
            r#"{"success":true,"token":"header.payload.signature"}"#
        );
    }

    #[test]
    fn test_failure_response_omits_token() {
        let response = AuthResponse::from(Err::<String, _>(AuthError::EmailTaken));
        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(
            serialized,
            r#"{"success":false,"errors":["Email already exists"]}"#
        );
    }
}
