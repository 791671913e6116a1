use registrar_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A uniqueness rule would be violated.
    #[error("{0}")]
    Conflict(String),
    /// A referenced record does not exist.
    #[error("{0}")]
    InvalidReference(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Maps unique violations to `Conflict(message)`, keeping other errors.
    pub(crate) fn unique(err: sqlx::Error, message: &str) -> Self {
        let is_unique = err
            .as_database_error()
            .map(|e| e.kind() == sqlx::error::ErrorKind::UniqueViolation)
            .unwrap_or(false);

        if is_unique {
            StoreError::Conflict(message.to_string())
        } else {
            StoreError::Database(err)
        }
    }

    /// Maps foreign key violations on the group reference.
    pub(crate) fn group_reference(err: sqlx::Error) -> Self {
        let is_fk = err
            .as_database_error()
            .map(|e| e.kind() == sqlx::error::ErrorKind::ForeignKeyViolation)
            .unwrap_or(false);

        if is_fk {
            StoreError::InvalidReference(GROUP_DOES_NOT_EXIST.to_string())
        } else {
            StoreError::Database(err)
        }
    }
}

pub(crate) const GROUP_DOES_NOT_EXIST: &str = "Group does not exist";

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err.to_string()),
            StoreError::Conflict(message) => AppError::conflict(message),
            StoreError::InvalidReference(message) => AppError::bad_request(message),
            StoreError::Database(e) => AppError::database(e),
            StoreError::Migration(e) => AppError::database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err: AppError = StoreError::NotFound("Teacher").into();
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.error.to_string(), "Teacher not found");
    }

    #[test]
    fn test_conflict_and_reference_statuses() {
        let err: AppError = StoreError::Conflict("Group with this code already exists".into()).into();
        assert_eq!(err.status.as_u16(), 409);

        let err: AppError = StoreError::InvalidReference(GROUP_DOES_NOT_EXIST.into()).into();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(err.is_server_error());
    }
}
