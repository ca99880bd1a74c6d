//! Queryable sources.
//!
//! [`Queryable`] is the seam between the compiler and whatever holds the
//! data. Filtering and ordering are deferred; only [`Queryable::count`] and
//! [`Queryable::window`] read records. [`MemorySource`] implements it over
//! a slice.

use crate::condition::Condition;
use crate::ordering::OrderBy;
use crate::schema::Record;

/// A deferred, filterable and orderable view over records.
pub trait Queryable: Sized {
    /// Record type the conditions and orderings are resolved against.
    type Record: Record;
    /// Item produced by [`window`](Self::window).
    type Item;

    /// Restricts the view. Repeated calls conjoin.
    fn filter(self, condition: Condition) -> Self;

    /// Orders the view, replacing any previous ordering.
    fn order_by(self, order: OrderBy) -> Self;

    /// Number of records in the current view.
    fn count(&self) -> usize;

    /// Reads `take` records after skipping `skip`.
    fn window(&self, skip: usize, take: usize) -> Vec<Self::Item>;
}

/// In-memory [`Queryable`] over a borrowed slice.
///
/// ```
/// # use once_cell::sync::Lazy;
/// # use standout_pager::{FieldKind, Record, Schema, Value};
/// use standout_pager::{OrderBy, Dir, Queryable, SliceSource};
///
/// # struct Task { priority: i64 }
/// # static SCHEMA: Lazy<Schema<Task>> = Lazy::new(|| {
/// #     Schema::<Task>::builder()
/// #         .field("priority", FieldKind::Int, |t| Value::from(t.priority))
/// #         .build()
/// #         .unwrap()
/// # });
/// # impl Record for Task {
/// #     fn schema() -> &'static Schema<Self> { &SCHEMA }
/// # }
/// let tasks = vec![Task { priority: 1 }, Task { priority: 3 }, Task { priority: 2 }];
/// let view = tasks.as_source().order_by(OrderBy::new("priority", Dir::Desc));
/// let top: Vec<i64> = view.window(0, 2).iter().map(|t| t.priority).collect();
/// assert_eq!(top, [3, 2]);
/// ```
#[derive(Debug)]
pub struct MemorySource<'a, T> {
    items: &'a [T],
    condition: Option<Condition>,
    ordering: Option<OrderBy>,
}

impl<'a, T: Record> MemorySource<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        MemorySource {
            items,
            condition: None,
            ordering: None,
        }
    }

    /// The accumulated condition, if any.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// The current ordering, if any.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.ordering.as_ref()
    }

    fn matching(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items
            .iter()
            .filter(move |item| self.condition.as_ref().is_none_or(|c| c.matches(*item)))
    }
}

impl<T> Clone for MemorySource<'_, T> {
    fn clone(&self) -> Self {
        MemorySource {
            items: self.items,
            condition: self.condition.clone(),
            ordering: self.ordering.clone(),
        }
    }
}

impl<'a, T: Record> Queryable for MemorySource<'a, T> {
    type Record = T;
    type Item = &'a T;

    fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(match self.condition.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    fn order_by(mut self, order: OrderBy) -> Self {
        self.ordering = Some(order);
        self
    }

    fn count(&self) -> usize {
        self.matching().count()
    }

    fn window(&self, skip: usize, take: usize) -> Vec<&'a T> {
        match &self.ordering {
            None => self.matching().skip(skip).take(take).collect(),
            Some(order) => {
                let mut results: Vec<&'a T> = self.matching().collect();
                // Stable, so ties keep source order.
                results.sort_by(|a, b| order.compare_records(*a, *b));
                results.into_iter().skip(skip).take(take).collect()
            }
        }
    }
}

impl<'a, T: Record> From<&'a [T]> for MemorySource<'a, T> {
    fn from(items: &'a [T]) -> Self {
        MemorySource::new(items)
    }
}

/// Turns a slice of records into a [`MemorySource`].
pub trait SliceSource<T: Record> {
    fn as_source(&self) -> MemorySource<'_, T>;
}

impl<T: Record> SliceSource<T> for [T] {
    fn as_source(&self) -> MemorySource<'_, T> {
        MemorySource::new(self)
    }
}
