//! Pager - dynamic filtering, ordering and pagination over typed records.
//!
//! Callers describe a page request with field names and string values only
//! (typically straight from request parameters). The pager resolves each
//! name against the record type's [`Schema`], parses each value into a
//! typed [`Literal`], compiles the filters into a [`Condition`] tree, and
//! reads one count and one window from a [`Queryable`] source.
//!
//! - Registration-time accessor tables instead of runtime reflection
//! - Extensible string parsers per field kind ([`ParserRegistry`])
//! - Equality, ordering and case-insensitive `LIKE` comparisons
//! - Left-to-right `And`/`Or` folding of filters
//! - Page arithmetic with typed errors
//!
//! # Quick Start
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use standout_pager::{
//!     get_paged, ComparisonOperator, FieldKind, Filter, LogicalConnector, PageQuery, Record,
//!     Schema, SliceSource, Sort, Value,
//! };
//!
//! struct Person {
//!     id: i64,
//!     gender: char,
//! }
//!
//! static PERSON_SCHEMA: Lazy<Schema<Person>> = Lazy::new(|| {
//!     Schema::<Person>::builder()
//!         .field("IdPerson", FieldKind::Int, |p| Value::from(p.id))
//!         .field("Gender", FieldKind::Char, |p| Value::from(p.gender))
//!         .build()
//!         .expect("valid person schema")
//! });
//!
//! impl Record for Person {
//!     fn schema() -> &'static Schema<Self> {
//!         &PERSON_SCHEMA
//!     }
//! }
//!
//! let people: Vec<Person> = (1..=30)
//!     .map(|id| Person { id, gender: if id % 2 == 1 { 'M' } else { 'F' } })
//!     .collect();
//!
//! let query = PageQuery::new(1, 3)
//!     .filter(Filter::equals("Gender", "M"))
//!     .filter(
//!         Filter::new("IdPerson", ComparisonOperator::LessThanOrEquals, "10")
//!             .connector(LogicalConnector::AndAlso),
//!     )
//!     .order_by(Sort::desc("IdPerson"));
//!
//! let page = get_paged(people.as_source(), &query)?;
//! assert_eq!(page.row_count, 5);
//! assert_eq!(page.page_count, 2);
//! let ids: Vec<i64> = page.results.iter().map(|p| p.id).collect();
//! assert_eq!(ids, [9, 7, 5]);
//! # Ok::<(), standout_pager::PagerError>(())
//! ```
//!
//! # What Is Not an Error
//!
//! A filter naming a field the record type does not have, a value that does
//! not parse for the field's kind, or an operator the kind does not support
//! is dropped, and the query proceeds as if it were absent. An ordering on
//! an unknown field is ignored. Each drop emits a `tracing` debug event.
//!
//! Empty or missing filter keys and values, non-positive paging arguments
//! and pages past the end are errors; see [`PagerError`].
//!
//! # Field Kinds and Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | String | `Equals`, `NotEquals`, ordering, `Contains`, `StartsWith`, `EndsWith` |
//! | Int, UInt, Float | `Equals`, `NotEquals`, ordering |
//! | Char, DateTime, Enum, Bool | `Equals`, `NotEquals`, ordering |
//!
//! Float NaN equals nothing and sorts after every other value.

mod compile;
mod condition;
mod error;
mod filter;
mod op;
mod ordering;
mod page;
mod pager;
mod parse;
mod schema;
mod source;
mod value;

// Re-export public API
pub use compile::{combine, compile_filter, compile_filters, NoneConnector};
pub use condition::{Condition, LikePattern};
pub use error::{FilterPart, PagerError, Result, SchemaError};
pub use filter::{validate_filters, Filter};
pub use op::{CompareOp, ComparisonOperator, LikeOption, LogicalConnector};
pub use ordering::{compare_values, order_source, Dir, OrderBy, Sort};
pub use page::{PageQuery, PageResult};
pub use pager::{get_paged, Pager, PagerConfig, QueryableExt};
pub use parse::{
    parse_bool, parse_char, parse_datetime, parse_enum, parse_float, parse_int, parse_string,
    parse_uint, ParseFn, ParserRegistry,
};
pub use schema::{FieldDef, FieldEnum, FieldKind, Getter, KindTag, Record, Schema, SchemaBuilder};
pub use source::{MemorySource, Queryable, SliceSource};
pub use value::{format_datetime, Literal, Number, Value, DATETIME_FORMAT};
