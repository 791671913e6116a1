//! Study groups and DTOs.

use registrar_core::pagination::deserialize_lenient_i64;
use registrar_core::{AppError, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::not_blank;
use crate::query::{Filter, ListQuery, SortSpec};

pub const GROUP_SORT_FIELDS: &[&str] = &["id", "name", "code", "created_at", "updated_at"];

/// A study group, identified by a unique code such as `INF-101`.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct GroupDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and code are required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name and code are required"),
        length(max = 20, message = "Code must be at most 20 characters")
    )]
    pub code: String,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupListParams {
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
    pub code: Option<String>,
}

impl GroupListParams {
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
            Filter::new("code", self.code.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(ListQuery {
            filters,
            sort: SortSpec::parse(self.sort_by.as_deref(), GROUP_SORT_FIELDS)?,
            limit: pagination.limit(),
            offset: pagination.offset(),
            only_id: None,
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PaginatedGroups {
    pub meta: PaginationMeta,
    pub items: Vec<Group>,
}
