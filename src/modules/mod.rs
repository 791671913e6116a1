//! Feature modules.
//!
//! Each module has a `controller.rs` with the HTTP handlers, a `service.rs`
//! with the logic behind them and a `router.rs` that mounts the handlers.
//!
//! Every protected handler runs its checks in the same order: authorization
//! policy, path id parsing, existence of the target, body validation, and only
//! then the write itself.

pub mod auth;
pub mod groups;
pub mod students;
pub mod system;
pub mod teachers;

use registrar_auth::{Operation, Resource};
use registrar_core::AppError;
use registrar_db::StoreError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Runs the authorization policy for the caller.
///
/// `target` is the path id when it parsed; own-record checks resolve the
/// caller's student record through the store.
pub(crate) async fn authorize(
    state: &AppState,
    auth_user: &AuthUser,
    resource: Resource,
    operation: Operation,
    target: Option<i64>,
) -> Result<(), AppError> {
    let store = state.store.as_ref();
    state
        .policy
        .authorize(
            auth_user.claims(),
            resource,
            operation,
            target,
            |user_id| async move {
                let student = store.find_student_by_user(user_id).await?;
                Ok::<_, StoreError>(student.map(|s| s.id))
            },
        )
        .await?
        .into_result()
}

/// Parses a path id, reporting `Invalid <entity> ID` on failure.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(format!("Invalid {entity} ID")))
}
