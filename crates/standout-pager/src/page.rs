//! Page request and page result types.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::ordering::Sort;

/// A page request: window, filters and ordering.
///
/// `page` and `page_size` are signed so out-of-range request values are
/// representable and rejected by validation.
///
/// ```
/// use standout_pager::{Filter, PageQuery, Sort};
///
/// let query = PageQuery::new(1, 10)
///     .filter(Filter::equals("Gender", "M"))
///     .order_by(Sort::desc("Age"));
/// assert_eq!(query.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub ordering: Option<Sort>,
}

impl PageQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        PageQuery {
            page,
            page_size,
            filters: Vec::new(),
            ordering: None,
        }
    }

    /// Appends a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends several filters.
    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Sets the ordering.
    pub fn order_by(mut self, sort: Sort) -> Self {
        self.ordering = Some(sort);
        self
    }
}

/// One page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub current_page: usize,
    pub page_size: usize,
    /// Filtered row count, before windowing.
    pub row_count: usize,
    pub page_count: usize,
    pub results: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Maps the results while keeping the metadata.
    pub fn map_results<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            current_page: self.current_page,
            page_size: self.page_size,
            row_count: self.row_count,
            page_count: self.page_count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::ComparisonOperator;

    fn result(current_page: usize, page_count: usize) -> PageResult<u32> {
        PageResult {
            current_page,
            page_size: 10,
            row_count: page_count * 10,
            page_count,
            results: vec![1, 2, 3],
        }
    }

    #[test]
    fn navigation_flags() {
        assert!(result(1, 3).has_next_page());
        assert!(!result(1, 3).has_previous_page());
        assert!(result(3, 3).has_previous_page());
        assert!(!result(3, 3).has_next_page());
    }

    #[test]
    fn map_results_keeps_metadata() {
        let mapped = result(2, 5).map_results(|n| n.to_string());
        assert_eq!(mapped.current_page, 2);
        assert_eq!(mapped.page_count, 5);
        assert_eq!(mapped.results, ["1", "2", "3"]);
    }

    #[test]
    fn query_from_request_json() {
        let query: PageQuery = serde_json::from_str(
            r#"{
                "page": 1,
                "pageSize": 10,
                "filters": [
                    {"key": "IdPerson", "value": "1", "comparison": "GreaterThanOrEquals"},
                    {"key": "IdPerson", "value": "10", "comparison": "LessThanOrEquals", "connector": "AndAlso"}
                ],
                "ordering": {"field": "Age", "dir": "desc"}
            }"#,
        )
        .unwrap();
        assert_eq!(query.page_size, 10);
        assert_eq!(query.filters[0].comparison, ComparisonOperator::GreaterThanOrEquals);
        assert_eq!(query.ordering, Some(Sort::desc("Age")));

        let negative: PageQuery = serde_json::from_str(r#"{"page": -1, "pageSize": 0}"#).unwrap();
        assert_eq!(negative, PageQuery::new(-1, 0));
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(result(1, 1)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["rowCount"], 10);
        assert_eq!(json["pageCount"], 1);
    }
}
