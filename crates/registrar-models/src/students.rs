//! Student records and DTOs.

use registrar_core::pagination::deserialize_lenient_i64;
use registrar_core::{AppError, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::not_blank;
use crate::query::{Filter, ListQuery, SortSpec};

pub const STUDENT_SORT_FIELDS: &[&str] = &[
    "id",
    "name",
    "surname",
    "email",
    "group_id",
    "user_id",
    "created_at",
    "updated_at",
];

/// A student record. `user_id` is set when the student has an account.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a student.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and surname are required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and surname are required"),
        length(max = 100, message = "Surname must be at most 100 characters")
    )]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub group_id: Option<i64>,
}

/// DTO for updating a student.
///
/// Name and surname are replaced; email and group are only changed when
/// present.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and surname are required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and surname are required"),
        length(max = 100, message = "Surname must be at most 100 characters")
    )]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub group_id: Option<i64>,
}

/// Query parameters for listing students.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 5)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
    /// Sort column, prefixed with `-` for descending order
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// Case-insensitive substring filter on the name
    pub name: Option<String>,
    /// Case-insensitive substring filter on the surname
    pub surname: Option<String>,
    /// Case-insensitive substring filter on the email
    pub email: Option<String>,
}

impl StudentListParams {
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
            sort: SortSpec::parse(self.sort_by.as_deref(), STUDENT_SORT_FIELDS)?,
            limit: pagination.limit(),
            offset: pagination.offset(),
            only_id: None,
        })
    }
}

/// Paginated response containing students.
#[derive(Serialize, Debug, ToSchema)]
pub struct PaginatedStudents {
    pub meta: PaginationMeta,
    pub items: Vec<Student>,
}
