use serde::Serialize;

/// Hard cap on caller-supplied page sizes. Unbounded fetches are never
/// honored; anything above this is clamped.
pub const MAX_LIMIT: i64 = 100;

const DEFAULT_LIMIT: i64 = 10;

/// Page-based pagination window parsed from query parameters.
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    page: i64,
    limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Derives the pagination summary from a total count taken over the same
    /// filter, independent of the skip/limit window.
    pub fn meta(&self, total_items: i64) -> PaginationMeta {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + self.limit - 1) / self.limit
        };

        PaginationMeta {
            current_page: self.page,
            total_pages,
            total_items,
            items_per_page: self.limit,
            has_next_page: self.page < total_pages,
            has_prev_page: self.page > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Parses a `sort` parameter: a single column name, optionally prefixed with
/// `-` for descending. Only whitelisted columns are honored; anything else
/// falls back to the default so the value can be spliced into SQL safely.
pub fn parse_sort(
    raw: Option<&str>,
    allowed: &[&'static str],
    default_column: &'static str,
) -> (&'static str, &'static str) {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return (default_column, "DESC"),
    };

    let (name, direction) = match raw.strip_prefix('-') {
        Some(rest) => (rest, "DESC"),
        None => (raw, "ASC"),
    };

    match allowed.iter().find(|col| **col == name) {
        Some(col) => (col, direction),
        None => (default_column, "DESC"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTABLE: &[&str] = &["created_at", "deadline", "amount", "title"];

    #[test]
    fn test_defaults() {
        let params = PaginationParams::new(None, None);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_window_page_two() {
        // 12 items, page 2 of 5-per-page: items 6-10.
        let params = PaginationParams::new(Some(2), Some(5));
        assert_eq!(params.offset(), 5);
        assert_eq!(params.limit(), 5);

        let meta = params.meta(12);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_items, 12);
        assert_eq!(meta.items_per_page, 5);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_limit_is_capped() {
        let params = PaginationParams::new(Some(1), Some(10_000));
        assert_eq!(params.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_non_positive_values_clamped() {
        let params = PaginationParams::new(Some(0), Some(-5));
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_meta_empty_collection() {
        let meta = PaginationParams::new(None, None).meta(0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PaginationParams::new(Some(3), Some(5)).meta(12);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PaginationParams::new(Some(2), Some(5)).meta(12);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""currentPage":2"#));
        assert!(serialized.contains(r#""totalPages":3"#));
        assert!(serialized.contains(r#""totalItems":12"#));
        assert!(serialized.contains(r#""itemsPerPage":5"#));
        assert!(serialized.contains(r#""hasNextPage":true"#));
        assert!(serialized.contains(r#""hasPrevPage":true"#));
    }

    #[test]
    fn test_parse_sort_default() {
        assert_eq!(parse_sort(None, SORTABLE, "created_at"), ("created_at", "DESC"));
        assert_eq!(parse_sort(Some(""), SORTABLE, "created_at"), ("created_at", "DESC"));
    }

    #[test]
    fn test_parse_sort_descending_prefix() {
        assert_eq!(parse_sort(Some("-deadline"), SORTABLE, "created_at"), ("deadline", "DESC"));
        assert_eq!(parse_sort(Some("amount"), SORTABLE, "created_at"), ("amount", "ASC"));
    }

    #[test]
    fn test_parse_sort_rejects_unknown_column() {
        assert_eq!(
            parse_sort(Some("password; DROP TABLE users"), SORTABLE, "created_at"),
            ("created_at", "DESC")
        );
    }
}
