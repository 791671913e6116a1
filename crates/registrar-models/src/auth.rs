//! Login and registration payloads.

use registrar_auth::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserProfile;

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
}

/// Returned by login and registration.
#[derive(Serialize, Debug, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// A new account to be stored together with its linked record.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewAccount {
    pub const PLACEHOLDER_NAME: &'static str = "New";

    /// Surname given to the record created alongside the account.
    pub fn placeholder_surname(&self) -> Option<&'static str> {
        match self.role {
            Role::Student => Some("Student"),
            Role::Teacher => Some("Teacher"),
            Role::Admin => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_password_min_length() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email": "a@x.com", "password": "12345", "role": "student"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let req = serde_json::from_str::<RegisterRequest>(
            r#"{"email": "a@x.com", "password": "secret1", "role": "janitor"}"#,
        );
        assert!(req.is_err());
    }

    #[test]
    fn test_login_requires_valid_email() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "secret1".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_placeholder_surname_per_role() {
        let account = |role| NewAccount {
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            role,
        };
        assert_eq!(account(Role::Student).placeholder_surname(), Some("Student"));
        assert_eq!(account(Role::Teacher).placeholder_surname(), Some("Teacher"));
        assert_eq!(account(Role::Admin).placeholder_surname(), None);
    }
}
