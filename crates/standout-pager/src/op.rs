//! Operators carried by filter requests.
//!
//! [`ComparisonOperator`] and [`LogicalConnector`] mirror the request
//! vocabulary one to one, including their `None` members. [`CompareOp`]
//! and [`LikeOption`] are the narrowed forms stored in compiled
//! conditions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison requested by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// No comparison; the filter is a no-op.
    #[default]
    None,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
    /// Case-insensitive substring match.
    Contains,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
}

impl ComparisonOperator {
    /// Returns the ordering operator this maps to, if any.
    pub fn as_compare(self) -> Option<CompareOp> {
        match self {
            ComparisonOperator::LessThan => Some(CompareOp::Lt),
            ComparisonOperator::LessThanOrEquals => Some(CompareOp::Lte),
            ComparisonOperator::GreaterThan => Some(CompareOp::Gt),
            ComparisonOperator::GreaterThanOrEquals => Some(CompareOp::Gte),
            _ => None,
        }
    }

    /// Returns the like option this maps to, if any.
    pub fn as_like(self) -> Option<LikeOption> {
        match self {
            ComparisonOperator::Contains => Some(LikeOption::Contains),
            ComparisonOperator::StartsWith => Some(LikeOption::StartsWith),
            ComparisonOperator::EndsWith => Some(LikeOption::EndsWith),
            _ => None,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::None => "none",
            ComparisonOperator::Equals => "eq",
            ComparisonOperator::NotEquals => "ne",
            ComparisonOperator::LessThan => "lt",
            ComparisonOperator::LessThanOrEquals => "lte",
            ComparisonOperator::GreaterThan => "gt",
            ComparisonOperator::GreaterThanOrEquals => "gte",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::StartsWith => "startswith",
            ComparisonOperator::EndsWith => "endswith",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<LikeOption> for ComparisonOperator {
    fn from(option: LikeOption) -> Self {
        match option {
            LikeOption::Contains => ComparisonOperator::Contains,
            LikeOption::StartsWith => ComparisonOperator::StartsWith,
            LikeOption::EndsWith => ComparisonOperator::EndsWith,
        }
    }
}

/// Connector joining a filter to the filters before it.
///
/// `And`/`AndAlso` both conjoin and `Or`/`OrElse` both disjoin; the pairs
/// only differ in the short-circuit flavor a backend may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalConnector {
    #[default]
    None,
    And,
    AndAlso,
    Or,
    OrElse,
}

impl LogicalConnector {
    /// Returns `true` for `And` and `AndAlso`.
    pub fn is_conjunction(self) -> bool {
        matches!(self, LogicalConnector::And | LogicalConnector::AndAlso)
    }

    /// Returns `true` for `Or` and `OrElse`.
    pub fn is_disjunction(self) -> bool {
        matches!(self, LogicalConnector::Or | LogicalConnector::OrElse)
    }
}

/// Ordering comparison stored in a compiled condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

impl CompareOp {
    /// Evaluates the comparison given the ordering of field vs. literal.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the wildcard goes in a like pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikeOption {
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
}

impl LikeOption {
    /// Injects `%` wildcards around a value.
    pub fn pattern(self, value: &str) -> String {
        match self {
            LikeOption::Contains => format!("%{value}%"),
            LikeOption::StartsWith => format!("{value}%"),
            LikeOption::EndsWith => format!("%{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_narrowing() {
        assert_eq!(
            ComparisonOperator::LessThanOrEquals.as_compare(),
            Some(CompareOp::Lte)
        );
        assert_eq!(ComparisonOperator::Equals.as_compare(), None);
        assert_eq!(
            ComparisonOperator::EndsWith.as_like(),
            Some(LikeOption::EndsWith)
        );
        assert_eq!(ComparisonOperator::None.as_like(), None);
    }

    #[test]
    fn compare_op_eval_ordering() {
        assert!(CompareOp::Lt.eval_ordering(Ordering::Less));
        assert!(!CompareOp::Lt.eval_ordering(Ordering::Equal));

        assert!(CompareOp::Lte.eval_ordering(Ordering::Equal));
        assert!(!CompareOp::Lte.eval_ordering(Ordering::Greater));

        assert!(CompareOp::Gt.eval_ordering(Ordering::Greater));
        assert!(!CompareOp::Gt.eval_ordering(Ordering::Equal));

        assert!(CompareOp::Gte.eval_ordering(Ordering::Equal));
        assert!(!CompareOp::Gte.eval_ordering(Ordering::Less));
    }

    #[test]
    fn connector_families() {
        assert!(LogicalConnector::And.is_conjunction());
        assert!(LogicalConnector::AndAlso.is_conjunction());
        assert!(LogicalConnector::OrElse.is_disjunction());
        assert!(!LogicalConnector::None.is_conjunction());
        assert!(!LogicalConnector::None.is_disjunction());
    }

    #[test]
    fn like_wildcard_injection() {
        assert_eq!(LikeOption::Contains.pattern("abc"), "%abc%");
        assert_eq!(LikeOption::StartsWith.pattern("abc"), "abc%");
        assert_eq!(LikeOption::EndsWith.pattern("abc"), "%abc");
    }

    #[test]
    fn like_option_into_comparison() {
        assert_eq!(
            ComparisonOperator::from(LikeOption::StartsWith),
            ComparisonOperator::StartsWith
        );
    }

    #[test]
    fn operators_deserialize_by_name() {
        let op: ComparisonOperator = serde_json::from_str("\"GreaterThanOrEquals\"").unwrap();
        assert_eq!(op, ComparisonOperator::GreaterThanOrEquals);
        let conn: LogicalConnector = serde_json::from_str("\"AndAlso\"").unwrap();
        assert_eq!(conn, LogicalConnector::AndAlso);
    }
}
