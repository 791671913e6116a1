//! List filters and sorting.
//!
//! `sortBy=name` sorts ascending, `sortBy=-name` descending. Only
//! whitelisted columns are accepted so values can be spliced into SQL.
//! Filters are case-insensitive substring matches; surrounding `*`
//! characters are stripped (`*smith*` matches like `smith`).

use registrar_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: "id",
            descending: false,
        }
    }
}

impl SortSpec {
    pub fn parse(raw: Option<&str>, allowed: &[&'static str]) -> Result<Self, AppError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let (name, descending) = match raw.strip_prefix('-') {
            Some(name) => (name, true),
            None => (raw, false),
        };

        allowed
            .iter()
            .copied()
            .find(|field| *field == name)
            .map(|field| Self {
                field,
                descending,
            })
            .ok_or_else(|| AppError::bad_request(format!("Invalid sort field: {name}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    /// Needle without wildcards.
    pub value: String,
}

impl Filter {
    /// Builds a filter, or `None` when nothing is left after trimming.
    pub fn new(column: &'static str, raw: Option<&str>) -> Option<Self> {
        let value = raw?.trim().trim_matches('*').trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            column,
            value: value.to_string(),
        })
    }

    /// Case-insensitive substring match, the same semantics as `ILIKE '%value%'`.
    pub fn matches(&self, candidate: Option<&str>) -> bool {
        candidate
            .map(|c| c.to_lowercase().contains(&self.value.to_lowercase()))
            .unwrap_or(false)
    }
}

/// A validated list request, ready for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub sort: SortSpec,
    pub limit: i64,
    pub offset: i64,
    /// Restricts the result to a single record id.
    pub only_id: Option<i64>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortSpec::default(),
            limit: registrar_core::pagination::DEFAULT_LIMIT,
            offset: 0,
            only_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["id", "name", "surname"];

    #[test]
    fn test_sort_defaults_to_id_ascending() {
        assert_eq!(SortSpec::parse(None, FIELDS).unwrap(), SortSpec::default());
        assert_eq!(SortSpec::parse(Some(""), FIELDS).unwrap(), SortSpec::default());
    }

    #[test]
    fn test_sort_descending_prefix() {
        let sort = SortSpec::parse(Some("-surname"), FIELDS).unwrap();
        assert_eq!(sort.field, "surname");
        assert!(sort.descending);
    }

    #[test]
    fn test_sort_rejects_unknown_column() {
        let err = SortSpec::parse(Some("password; DROP TABLE users"), FIELDS).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[test]
    fn test_filter_strips_wildcards() {
        let filter = Filter::new("name", Some("*Ann*")).unwrap();
        assert_eq!(filter.value, "Ann");
        assert!(filter.matches(Some("joANNa")));
        assert!(!filter.matches(Some("Bob")));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_empty_filter_is_ignored() {
        assert!(Filter::new("name", Some("**")).is_none());
        assert!(Filter::new("name", None).is_none());
    }
}
