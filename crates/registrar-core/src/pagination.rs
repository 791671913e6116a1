//! Pagination utilities for list endpoints.
//!
//! Lists are page based:
//! - `page`: 1-indexed page number (default: 1)
//! - `limit`: items per page (1-100, default: 5)
//!
//! Unparseable or out-of-range values fall back to the defaults instead of
//! failing the request.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "meta": {
//!     "total_items": 12,
//!     "total_pages": 3,
//!     "current_page": 1,
//!     "per_page": 5,
//!     "remaining_count": 7
//!   },
//!   "items": [...]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;
pub const MAX_LIMIT: i64 = 100;

/// Deserializes a query value into an optional i64, treating empty or
/// non-numeric input as absent.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items matching the filters
    pub total_items: i64,
    /// Number of pages at the current page size
    pub total_pages: i64,
    /// Page that was returned
    pub current_page: i64,
    /// Page size that was applied
    pub per_page: i64,
    /// Items left after the current page
    pub remaining_count: i64,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total_items: i64, page: i64, per_page: i64) -> Self {
        let total_pages = (total_items + per_page - 1) / per_page;
        let remaining_count = (total_items - page.saturating_mul(per_page)).max(0);

        Self {
            total_items,
            total_pages,
            current_page: page,
            per_page,
            remaining_count,
        }
    }
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 5)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        match self.page {
            Some(page) if page >= 1 => page,
            _ => DEFAULT_PAGE,
        }
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit >= 1 => limit.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    /// Saturates for page numbers past any possible result set.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}
