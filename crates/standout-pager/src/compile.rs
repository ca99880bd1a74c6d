//! Filter compilation and combination.
//!
//! [`compile_filter`] turns one untyped [`Filter`] into a typed
//! [`Condition`] for a record type, or `None` when the filter does not
//! apply (unknown field, unparsable value, operator the field kind does
//! not support). [`combine`] folds the compiled conditions left to right
//! with their connectors.

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, LikePattern};
use crate::filter::Filter;
use crate::op::{ComparisonOperator, LogicalConnector};
use crate::parse::ParserRegistry;
use crate::schema::Record;

/// How a filter whose connector is [`LogicalConnector::None`] joins the
/// conditions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoneConnector {
    /// Conjoin, as if the connector were `And`.
    #[default]
    And,
    /// Keep the accumulated condition and drop the new one.
    Discard,
}

/// Compiles one filter against the schema of `T`.
///
/// The filter's key and value are expected to be present; see
/// [`validate_filters`](crate::validate_filters). Returns `None` whenever
/// the filter should be skipped.
pub fn compile_filter<T: Record>(filter: &Filter, parsers: &ParserRegistry) -> Option<Condition> {
    let key = filter.key.as_deref().unwrap_or_default();
    let Some(field) = T::schema().resolve(Some(key)) else {
        tracing::debug!(field = %key, "skipping filter on unknown field");
        return None;
    };
    let kind = field.kind();
    let raw = filter.value.as_deref().unwrap_or_default();
    let Some(value) = parsers.parse(raw, kind) else {
        tracing::debug!(field = %key, %kind, value = %raw, "skipping filter with unparsable value");
        return None;
    };
    let field_name = field.name().to_string();

    let comparison = filter.comparison;
    let condition = match comparison {
        ComparisonOperator::None => return None,
        ComparisonOperator::Equals => Condition::Equals {
            field: field_name,
            value,
        },
        ComparisonOperator::NotEquals => Condition::NotEquals {
            field: field_name,
            value,
        },
        _ => {
            if let Some(op) = comparison.as_compare() {
                Condition::Compare {
                    field: field_name,
                    op,
                    value,
                }
            } else {
                let option = comparison.as_like()?;
                if !kind.supports_like() {
                    tracing::debug!(field = %key, %kind, %comparison, "skipping like filter on non-string field");
                    return None;
                }
                let pattern = match LikePattern::with_option(raw, option) {
                    Ok(pattern) => pattern,
                    Err(err) => {
                        tracing::debug!(field = %key, error = %err, "skipping like filter with oversized pattern");
                        return None;
                    }
                };
                Condition::Like {
                    field: field_name,
                    option,
                    pattern,
                }
            }
        }
    };
    tracing::trace!(condition = %condition, "compiled filter");
    Some(condition)
}

/// Folds compiled conditions left to right.
///
/// Skipped filters (`None` conditions) are left out entirely. The first
/// effective condition seeds the accumulator, so its connector is ignored.
/// A `None` result means there is no effective filter.
pub fn combine<I>(conditions: I, none_connector: NoneConnector) -> Option<Condition>
where
    I: IntoIterator<Item = (Option<Condition>, LogicalConnector)>,
{
    conditions
        .into_iter()
        .fold(None, |acc, (condition, connector)| {
            let Some(condition) = condition else {
                return acc;
            };
            let Some(acc) = acc else {
                return Some(condition);
            };
            Some(match connector {
                c if c.is_conjunction() => acc.and(condition),
                c if c.is_disjunction() => acc.or(condition),
                _ => match none_connector {
                    NoneConnector::And => acc.and(condition),
                    NoneConnector::Discard => acc,
                },
            })
        })
}

/// Compiles and combines a whole filter list.
///
/// Validation is the caller's job and must happen before this.
pub fn compile_filters<T: Record>(
    filters: &[Filter],
    parsers: &ParserRegistry,
    none_connector: NoneConnector,
) -> Option<Condition> {
    combine(
        filters
            .iter()
            .map(|f| (compile_filter::<T>(f, parsers), f.connector)),
        none_connector,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{CompareOp, LikeOption};
    use crate::schema::{FieldKind, Schema};
    use crate::value::{Literal, Number, Value};
    use once_cell::sync::Lazy;
    use tracing_test::traced_test;

    struct Task {
        title: String,
        priority: i64,
        done: bool,
        tag: char,
    }

    static TASK_SCHEMA: Lazy<Schema<Task>> = Lazy::new(|| {
        Schema::<Task>::builder()
            .field("title", FieldKind::String, |t| Value::from(&t.title))
            .field("priority", FieldKind::Int, |t| Value::from(t.priority))
            .field("done", FieldKind::Bool, |t| Value::from(t.done))
            .field("tag", FieldKind::Char, |t| Value::from(t.tag))
            .build()
            .unwrap()
    });

    impl Record for Task {
        fn schema() -> &'static Schema<Self> {
            &TASK_SCHEMA
        }
    }

    fn compile(key: &str, comparison: ComparisonOperator, value: &str) -> Option<Condition> {
        compile_filter::<Task>(&Filter::new(key, comparison, value), ParserRegistry::global())
    }

    fn eq(field: &str, n: i64) -> Condition {
        Condition::Equals {
            field: field.into(),
            value: Literal::Number(Number::I64(n)),
        }
    }

    #[test]
    fn compiles_equality() {
        assert_eq!(compile("priority", ComparisonOperator::Equals, "3"), Some(eq("priority", 3)));
        assert_eq!(
            compile("title", ComparisonOperator::NotEquals, "x"),
            Some(Condition::NotEquals {
                field: "title".into(),
                value: Literal::String("x".into()),
            })
        );
    }

    #[test]
    fn compiles_ordering() {
        assert_eq!(
            compile("priority", ComparisonOperator::GreaterThanOrEquals, "1"),
            Some(Condition::Compare {
                field: "priority".into(),
                op: CompareOp::Gte,
                value: Literal::Number(Number::I64(1)),
            })
        );
    }

    #[test]
    fn compiles_like_with_wildcards() {
        let Some(Condition::Like { field, option, pattern }) =
            compile("title", ComparisonOperator::StartsWith, "Fix")
        else {
            panic!("expected a like condition");
        };
        assert_eq!(field, "title");
        assert_eq!(option, LikeOption::StartsWith);
        assert_eq!(pattern.as_str(), "Fix%");
    }

    #[test]
    fn skips_unknown_field_and_bad_value() {
        assert_eq!(compile("SomeThing", ComparisonOperator::Equals, "Value"), None);
        assert_eq!(compile("Priority", ComparisonOperator::Equals, "1"), None);
        assert_eq!(compile("priority", ComparisonOperator::Equals, "high"), None);
    }

    #[test]
    fn skips_inapplicable_operators() {
        assert_eq!(compile("title", ComparisonOperator::None, "x"), None);
        assert_eq!(compile("priority", ComparisonOperator::Contains, "1"), None);
        assert_eq!(compile("tag", ComparisonOperator::StartsWith, "a"), None);
        assert!(compile("done", ComparisonOperator::Equals, "true").is_some());
    }

    #[test]
    fn bool_fields_accept_ordering_filters() {
        let condition = compile("done", ComparisonOperator::LessThan, "true").unwrap();
        assert!(matches!(condition, Condition::Compare { op: CompareOp::Lt, .. }));
        assert_eq!(condition.to_string(), "done lt true");
    }

    #[traced_test]
    #[test]
    fn skipped_filters_are_logged() {
        assert_eq!(compile("SomeThing", ComparisonOperator::Equals, "Value"), None);
        assert!(logs_contain("skipping filter on unknown field"));
        assert!(logs_contain("SomeThing"));

        assert_eq!(compile("priority", ComparisonOperator::Equals, "high"), None);
        assert!(logs_contain("skipping filter with unparsable value"));
    }

    #[test]
    fn combine_empty_is_none() {
        assert_eq!(combine(Vec::new(), NoneConnector::And), None);
        assert_eq!(
            combine(vec![(None, LogicalConnector::And)], NoneConnector::And),
            None
        );
    }

    #[test]
    fn combine_ignores_first_connector() {
        let combined = combine(
            vec![(Some(eq("priority", 1)), LogicalConnector::Or)],
            NoneConnector::Discard,
        );
        assert_eq!(combined, Some(eq("priority", 1)));
    }

    #[test]
    fn combine_folds_left() {
        let combined = combine(
            vec![
                (Some(eq("priority", 1)), LogicalConnector::None),
                (Some(eq("priority", 2)), LogicalConnector::OrElse),
                (Some(eq("priority", 3)), LogicalConnector::AndAlso),
            ],
            NoneConnector::And,
        );
        assert_eq!(
            combined,
            Some(eq("priority", 1).or(eq("priority", 2)).and(eq("priority", 3)))
        );
    }

    #[test]
    fn skipped_conditions_do_not_break_the_chain() {
        let combined = combine(
            vec![
                (None, LogicalConnector::None),
                (Some(eq("priority", 1)), LogicalConnector::And),
                (None, LogicalConnector::Or),
                (Some(eq("priority", 2)), LogicalConnector::Or),
            ],
            NoneConnector::And,
        );
        assert_eq!(combined, Some(eq("priority", 1).or(eq("priority", 2))));
    }

    #[test]
    fn none_connector_policy() {
        let input = || {
            vec![
                (Some(eq("priority", 1)), LogicalConnector::None),
                (Some(eq("priority", 2)), LogicalConnector::None),
            ]
        };
        assert_eq!(
            combine(input(), NoneConnector::And),
            Some(eq("priority", 1).and(eq("priority", 2)))
        );
        assert_eq!(combine(input(), NoneConnector::Discard), Some(eq("priority", 1)));
    }

    #[test]
    fn compile_filters_drops_skipped() {
        let filters = vec![
            Filter::new("nope", ComparisonOperator::Equals, "1"),
            Filter::equals("priority", "1"),
        ];
        assert_eq!(
            compile_filters::<Task>(&filters, ParserRegistry::global(), NoneConnector::And),
            Some(eq("priority", 1))
        );
    }

    #[test]
    fn none_connector_deserializes() {
        let policy: NoneConnector = serde_json::from_str("\"discard\"").unwrap();
        assert_eq!(policy, NoneConnector::Discard);
    }
}
