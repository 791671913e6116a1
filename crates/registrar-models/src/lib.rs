//! # Registrar Models
//!
//! Domain models and DTOs for the Registrar API.
//!
//! - [`users`]: accounts and the profile returned to clients
//! - [`auth`]: login and registration payloads
//! - [`students`], [`teachers`], [`groups`]: academic records
//! - [`query`]: list filters and sorting shared by the list endpoints

pub mod auth;
pub mod groups;
pub mod query;
pub mod students;
pub mod teachers;
pub mod users;

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
