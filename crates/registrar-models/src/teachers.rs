//! Teacher records and DTOs.

use registrar_core::pagination::deserialize_lenient_i64;
use registrar_core::{AppError, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::not_blank;
use crate::query::{Filter, ListQuery, SortSpec};

pub const TEACHER_SORT_FIELDS: &[&str] = &[
    "id",
    "name",
    "surname",
    "email",
    "phone",
    "user_id",
    "created_at",
    "updated_at",
];

/// A teacher record. Emails are unique across teachers.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating or replacing a teacher.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct TeacherDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name, surname and email are required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name, surname and email are required"),
        length(max = 100, message = "Surname must be at most 100 characters")
    )]
    pub surname: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name, surname and email are required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Query parameters for listing teachers.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeacherListParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 5)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
    /// Sort column, prefixed with `-` for descending order
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

impl TeacherListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn to_query(&self) -> Result<ListQuery, AppError> {
        let pagination = self.pagination();
        let filters = [
            Filter::new("name", self.name.as_deref()),
            Filter::new("surname", self.surname.as_deref()),
            Filter::new("email", self.email.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(ListQuery {
            filters,
            sort: SortSpec::parse(self.sort_by.as_deref(), TEACHER_SORT_FIELDS)?,
            limit: pagination.limit(),
            offset: pagination.offset(),
            only_id: None,
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PaginatedTeachers {
    pub meta: PaginationMeta,
    pub items: Vec<Teacher>,
}
