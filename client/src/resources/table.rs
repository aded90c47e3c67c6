//! Table Narrowing
//!
//! Pure, in-memory narrowing of an already fetched list: column search,
//! pagination, then an optional sort of the current page only.
//! Columns are the record's serialized field names; `tenant.name` reaches
//! into nested objects.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

/// Search, page and sort settings for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// `(column, text)`; case-insensitive substring match.
    pub search: Option<(String, String)>,
    pub sort: Option<SortSpec>,
    /// Zero-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<Value>,
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the search, across all pages.
    pub total: usize,
}

/// Text of `column` in `row`, if present and scalar.
#[must_use]
pub fn cell(row: &Value, column: &str) -> Option<String> {
    let pointer = format!("/{}", column.replace('.', "/"));
    match row.pointer(&pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn compare_cells(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Narrow `records` to the page `query` asks for.
#[must_use]
pub fn narrow<R: Serialize>(records: &[R], query: &TableQuery) -> TablePage {
    let mut rows: Vec<Value> = records
        .iter()
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect();

    if let Some((column, text)) = &query.search {
        let needle = text.trim().to_lowercase();
        if !needle.is_empty() {
            rows.retain(|row| {
                cell(row, column).is_some_and(|value| value.to_lowercase().contains(&needle))
            });
        }
    }

    let total = rows.len();
    let page_size = query.page_size.max(1);
    let page_count = total.div_ceil(page_size).max(1);
    let page = query.page.min(page_count - 1);

    let mut rows: Vec<Value> = rows
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .collect();

    if let Some(sort) = &query.sort {
        rows.sort_by(|a, b| {
            let ordering = compare_cells(
                cell(a, &sort.column).as_deref(),
                cell(b, &sort.column).as_deref(),
            );
            if sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    TablePage {
        rows,
        page,
        page_count,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        amount: f64,
        tenant: Option<Tenant>,
    }

    #[derive(Serialize)]
    struct Tenant {
        name: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Delta", amount: 40.0, tenant: Some(Tenant { name: "Abay" }) },
            Row { name: "alpha", amount: 5.0, tenant: None },
            Row { name: "Charlie", amount: 300.0, tenant: Some(Tenant { name: "Tana" }) },
            Row { name: "bravo", amount: 20.0, tenant: Some(Tenant { name: "abay south" }) },
        ]
    }

    fn names(page: &TablePage) -> Vec<String> {
        page.rows.iter().filter_map(|r| cell(r, "name")).collect()
    }

    #[test]
    fn test_no_query_keeps_backend_order() {
        let page = narrow(&rows(), &TableQuery::default());
        assert_eq!(names(&page), ["Delta", "alpha", "Charlie", "bravo"]);
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn test_search_nested_column_case_insensitive() {
        let query = TableQuery {
            search: Some(("tenant.name".into(), "ABAY".into())),
            ..TableQuery::default()
        };
        let page = narrow(&rows(), &query);
        assert_eq!(names(&page), ["Delta", "bravo"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_sort_applies_to_current_page_only() {
        let query = TableQuery {
            page: 1,
            page_size: 2,
            sort: Some(SortSpec { column: "name".into(), descending: false }),
            ..TableQuery::default()
        };
        let page = narrow(&rows(), &query);
        // Page two holds Charlie and bravo; alpha stays on page one.
        assert_eq!(names(&page), ["bravo", "Charlie"]);
        assert_eq!(page.page_count, 2);
    }

    #[test]
    fn test_numeric_sort_descending() {
        let query = TableQuery {
            sort: Some(SortSpec { column: "amount".into(), descending: true }),
            ..TableQuery::default()
        };
        let page = narrow(&rows(), &query);
        assert_eq!(names(&page), ["Charlie", "Delta", "bravo", "alpha"]);
    }

    #[test]
    fn test_page_past_end_clamps() {
        let query = TableQuery { page: 9, page_size: 3, ..TableQuery::default() };
        let page = narrow(&rows(), &query);
        assert_eq!(page.page, 1);
        assert_eq!(names(&page), ["bravo"]);
    }

    #[test]
    fn test_cell_scalars_only() {
        let row = json!({"a": {"b": 1}, "flag": true, "none": null});
        assert_eq!(cell(&row, "a.b").as_deref(), Some("1"));
        assert_eq!(cell(&row, "flag").as_deref(), Some("true"));
        assert_eq!(cell(&row, "a"), None);
        assert_eq!(cell(&row, "none"), None);
    }
}
