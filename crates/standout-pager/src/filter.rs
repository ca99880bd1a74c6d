//! Untyped filter requests.
//!
//! A [`Filter`] is request data: a field name, a string value, the
//! comparison to apply and the connector joining it to the filters before
//! it. Nothing about it is checked against a record type until it is
//! compiled.

use serde::{Deserialize, Serialize};

use crate::error::{FilterPart, PagerError, Result};
use crate::op::{ComparisonOperator, LogicalConnector};

/// One untyped comparison.
///
/// `key` and `value` are optional because request payloads may carry
/// nulls; such filters are rejected by [`validate_filters`].
///
/// ```
/// use standout_pager::{ComparisonOperator, Filter, LogicalConnector};
///
/// let filter = Filter::new("IdPerson", ComparisonOperator::LessThanOrEquals, "10")
///     .connector(LogicalConnector::AndAlso);
/// assert_eq!(filter.key.as_deref(), Some("IdPerson"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub comparison: ComparisonOperator,
    #[serde(default)]
    pub connector: LogicalConnector,
}

impl Filter {
    /// Creates a filter with the default (`None`) connector.
    pub fn new(
        key: impl Into<String>,
        comparison: ComparisonOperator,
        value: impl Into<String>,
    ) -> Self {
        Filter {
            key: Some(key.into()),
            value: Some(value.into()),
            comparison,
            connector: LogicalConnector::None,
        }
    }

    /// Sets the connector joining this filter to the previous ones.
    pub fn connector(mut self, connector: LogicalConnector) -> Self {
        self.connector = connector;
        self
    }

    /// Equality filter.
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::new(key, ComparisonOperator::Equals, value)
    }

    /// Inequality filter.
    pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::new(key, ComparisonOperator::NotEquals, value)
    }

    /// Returns the first empty part of this filter, key before value.
    pub fn missing_part(&self) -> Option<FilterPart> {
        if is_blank(&self.key) {
            Some(FilterPart::Key)
        } else if is_blank(&self.value) {
            Some(FilterPart::Value)
        } else {
            None
        }
    }
}

fn is_blank(s: &Option<String>) -> bool {
    s.as_deref().is_none_or(str::is_empty)
}

/// Checks a whole filter list before anything is compiled.
///
/// Fails on the first filter with an absent or empty key or value.
pub fn validate_filters(filters: &[Filter]) -> Result<()> {
    for (index, filter) in filters.iter().enumerate() {
        if let Some(part) = filter.missing_part() {
            return Err(PagerError::FilterInvalid { index, part });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_filters_pass() {
        let filters = vec![
            Filter::equals("Gender", "M"),
            Filter::new("SomeThing", ComparisonOperator::None, "Value"),
        ];
        assert_eq!(validate_filters(&filters), Ok(()));
        assert_eq!(validate_filters(&[]), Ok(()));
    }

    #[test]
    fn null_key_reported_before_null_value() {
        let filters = vec![Filter {
            comparison: ComparisonOperator::StartsWith,
            ..Filter::default()
        }];
        assert_eq!(
            validate_filters(&filters),
            Err(PagerError::FilterInvalid {
                index: 0,
                part: FilterPart::Key
            })
        );
    }

    #[test]
    fn empty_value_is_invalid() {
        let filters = vec![
            Filter::equals("Gender", "M"),
            Filter::new("SomeThing", ComparisonOperator::StartsWith, ""),
        ];
        assert_eq!(
            validate_filters(&filters),
            Err(PagerError::FilterInvalid {
                index: 1,
                part: FilterPart::Value
            })
        );
    }

    #[test]
    fn first_violation_wins() {
        let filters = vec![
            Filter::new("", ComparisonOperator::Equals, "x"),
            Filter::new("Age", ComparisonOperator::Equals, ""),
        ];
        assert_eq!(
            validate_filters(&filters),
            Err(PagerError::FilterInvalid {
                index: 0,
                part: FilterPart::Key
            })
        );
    }

    #[test]
    fn deserializes_request_json() {
        let filter: Filter = serde_json::from_str(
            r#"{"key":"IdPerson","value":"10","comparison":"LessThanOrEquals","connector":"AndAlso"}"#,
        )
        .unwrap();
        assert_eq!(
            filter,
            Filter::new("IdPerson", ComparisonOperator::LessThanOrEquals, "10")
                .connector(LogicalConnector::AndAlso)
        );

        let nulls: Filter =
            serde_json::from_str(r#"{"key":null,"value":null,"comparison":"StartsWith"}"#).unwrap();
        assert_eq!(nulls.missing_part(), Some(FilterPart::Key));
        assert_eq!(nulls.connector, LogicalConnector::None);
    }
}
