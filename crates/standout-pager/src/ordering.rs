//! Ordering types and the ordering compiler.
//!
//! [`Sort`] is the request form (field name plus optional direction);
//! [`OrderBy`] is the resolved form handed to a [`Queryable`] source.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::Record;
use crate::source::Queryable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested ordering, as read from a request.
///
/// Without a direction the request carries no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub dir: Option<Dir>,
}

impl Sort {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        Sort {
            field: field.into(),
            dir: Some(dir),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Sort::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Sort::new(field, Dir::Desc)
    }
}

/// A resolved ordering clause: a known field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    ///
    /// Missing values and NaN sort last in both directions. Returns `None`
    /// if the values are of different kinds.
    pub fn compare<'a>(&self, a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
        match (a.sorts_last(), b.sorts_last()) {
            (false, false) => compare_values(a, b).map(|o| self.dir.apply(o)),
            (a_last, b_last) => Some(a_last.cmp(&b_last)),
        }
    }

    /// Compares two records by this ordering's field.
    ///
    /// Incomparable values compare equal, so a stable sort keeps them in
    /// source order.
    pub fn compare_records<T: Record>(&self, a: &T, b: &T) -> Ordering {
        self.compare(&a.field_value(&self.field), &b.field_value(&self.field))
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.dir)
    }
}

/// Compares two values of the same kind.
///
/// Numbers use [`Number::total_cmp`], so NaN sorts after every number.
/// Returns `None` if the kinds don't match.
pub fn compare_values<'a>(a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => Some(a.total_cmp(*b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        // None values sort last
        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Applies a requested ordering to a source.
///
/// An absent sort, a sort without direction, or a field the record type
/// does not have leaves the source unchanged.
pub fn order_source<S: Queryable>(source: S, sort: Option<&Sort>) -> S {
    let Some(sort) = sort else {
        return source;
    };
    let Some(dir) = sort.dir else {
        tracing::debug!(field = %sort.field, "ordering has no direction, ignoring");
        return source;
    };
    match S::Record::schema().resolve(Some(sort.field.as_str())) {
        Some(field) => source.order_by(OrderBy::new(field.name(), dir)),
        None => {
            tracing::debug!(field = %sort.field, "ignoring ordering on unknown field");
            source
        }
    }
}
