//! Error types for the pager crate.

use std::fmt;

use thiserror::Error;

/// Errors surfaced to callers of the paging and filtering operations.
///
/// All of them are request-validation failures: nothing is retried and no
/// partial result is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PagerError {
    /// A paging argument is out of its valid range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The requested page lies past the last page of the filtered set.
    #[error("page {page} is out of range: the result has {page_count} page(s)")]
    PageOutOfRange { page: usize, page_count: usize },

    /// A filter carries an absent or empty key or value.
    #[error("filter #{index} has an empty {part}")]
    FilterInvalid { index: usize, part: FilterPart },
}

/// Which half of a filter failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPart {
    Key,
    Value,
}

impl fmt::Display for FilterPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPart::Key => f.write_str("key"),
            FilterPart::Value => f.write_str("value"),
        }
    }
}

/// Errors raised while registering a record type's accessor table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("field '{0}' is registered more than once")]
    DuplicateField(String),

    #[error("enum field '{0}' declares no variants")]
    EmptyEnum(String),
}

/// Result type for pager operations.
pub type Result<T> = std::result::Result<T, PagerError>;
