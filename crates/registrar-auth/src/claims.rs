//! Identity claims carried by bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// Verified identity of the caller.
///
/// - `user_id`: account id
/// - `email`: account email, repeated in `sub`
/// - `role`: account role
/// - `exp` / `iat` / `nbf`: Unix timestamps (seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub sub: String,
}

impl Claims {
    pub fn new(user_id: i64, email: &str, role: Role, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            user_id,
            email: email.to_string(),
            role,
            exp: issued_at.saturating_add(ttl_seconds),
            iat: issued_at,
            nbf: issued_at,
            sub: email.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
