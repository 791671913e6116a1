//! User accounts.

use registrar_auth::Role;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::students::Student;
use crate::teachers::Teacher;

/// A stored account, including its password hash. Never serialized; clients
/// receive a [`UserProfile`].
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// An account as returned to clients, with its linked record loaded.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<Teacher>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    pub fn new(user: User, student: Option<Student>, teacher: Option<Teacher>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            student_id: user.student_id,
            teacher_id: user.teacher_id,
            student,
            teacher,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$2b$04$hash".into(),
            role: Role::Student,
            student_id: Some(9),
            teacher_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_profile_never_contains_password() {
        let json = serde_json::to_value(UserProfile::new(user(), None, None)).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "student");
        assert_eq!(json["student_id"], 9);
        assert!(json.get("teacher_id").is_none());
    }
}
