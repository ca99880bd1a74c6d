//! The paginator and the public query operations.
//!
//! [`Pager`] validates a [`PageQuery`], compiles its filters and ordering
//! against the source's record type, then reads one count and one window.
//! [`QueryableExt`] exposes the same building blocks as chainable methods
//! on every [`Queryable`], using the default pager.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::compile::{combine, compile_filter, compile_filters, NoneConnector};
use crate::error::{PagerError, Result};
use crate::filter::{validate_filters, Filter};
use crate::op::{LikeOption, LogicalConnector};
use crate::ordering::{order_source, Dir, Sort};
use crate::page::{PageQuery, PageResult};
use crate::parse::ParserRegistry;
use crate::source::Queryable;

static DEFAULT_PAGER: Lazy<Pager> = Lazy::new(Pager::default);

/// Paginator settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagerConfig {
    /// Upper bound on `page_size`; unbounded when absent.
    #[serde(default)]
    pub max_page_size: Option<usize>,
    /// How filters with a `None` connector join the filters before them.
    #[serde(default)]
    pub none_connector: NoneConnector,
}

/// Compiles page queries against [`Queryable`] sources.
#[derive(Debug, Clone, Default)]
pub struct Pager {
    config: PagerConfig,
    parsers: ParserRegistry,
}

impl Pager {
    pub fn new(config: PagerConfig) -> Self {
        Pager {
            config,
            parsers: ParserRegistry::new(),
        }
    }

    /// Replaces the parser registry used to read filter values.
    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    /// The shared pager with default settings.
    pub fn global() -> &'static Pager {
        &DEFAULT_PAGER
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Runs a page query.
    ///
    /// Paging arguments and filters are validated before the source is
    /// read. Unknown fields, unparsable values and unknown sort fields are
    /// not errors; they are dropped.
    ///
    /// # Errors
    ///
    /// - [`PagerError::InvalidArgument`] for `page < 1`, `page_size < 1`
    ///   or a `page_size` above the configured maximum.
    /// - [`PagerError::FilterInvalid`] for a filter with an empty key or value.
    /// - [`PagerError::PageOutOfRange`] when `page` lies past the last page,
    ///   including any page of an empty result.
    pub fn get_paged<S: Queryable>(
        &self,
        source: S,
        query: &PageQuery,
    ) -> Result<PageResult<S::Item>> {
        let page = positive("page", query.page)?;
        let page_size = positive("page_size", query.page_size)?;
        if let Some(max) = self.config.max_page_size {
            if page_size > max {
                return Err(PagerError::InvalidArgument {
                    name: "page_size",
                    reason: format!("must be at most {max}, got {page_size}"),
                });
            }
        }

        let filtered = if query.filters.is_empty() {
            source
        } else {
            self.where_filtered(source, &query.filters)?
        };
        let ordered = order_source(filtered, query.ordering.as_ref());

        let row_count = ordered.count();
        let page_count = row_count.div_ceil(page_size);
        tracing::debug!(page, page_size, row_count, page_count, "computed page window");
        if page_count < page {
            return Err(PagerError::PageOutOfRange { page, page_count });
        }

        let results = ordered.window((page - 1) * page_size, page_size);
        Ok(PageResult {
            current_page: page,
            page_size,
            row_count,
            page_count,
            results,
        })
    }

    /// Validates, compiles and applies a filter list.
    ///
    /// When no filter survives compilation the source is returned as is.
    pub fn where_filtered<S: Queryable>(&self, source: S, filters: &[Filter]) -> Result<S> {
        validate_filters(filters)?;
        let condition =
            compile_filters::<S::Record>(filters, &self.parsers, self.config.none_connector);
        Ok(match condition {
            Some(condition) => source.filter(condition),
            None => source,
        })
    }

    /// Applies a like condition for every field and word pair.
    ///
    /// Words are folded per field with `connector`, then the per-field
    /// conditions are folded with the same connector. Unknown and
    /// non-string fields are skipped.
    pub fn where_likes<S: Queryable>(
        &self,
        source: S,
        fields: &[&str],
        words: &[&str],
        option: LikeOption,
        connector: LogicalConnector,
    ) -> Result<S> {
        let filters: Vec<Vec<Filter>> = fields
            .iter()
            .map(|field| {
                words
                    .iter()
                    .map(|word| Filter::new(*field, option.into(), *word).connector(connector))
                    .collect()
            })
            .collect();
        validate_filters(&filters.concat())?;

        let per_field = filters.iter().map(|group| {
            let condition = combine(
                group
                    .iter()
                    .map(|f| (compile_filter::<S::Record>(f, &self.parsers), connector)),
                self.config.none_connector,
            );
            (condition, connector)
        });
        Ok(match combine(per_field, self.config.none_connector) {
            Some(condition) => source.filter(condition),
            None => source,
        })
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize> {
    if value < 1 {
        return Err(PagerError::InvalidArgument {
            name,
            reason: format!("must be at least 1, got {value}"),
        });
    }
    usize::try_from(value).map_err(|_| PagerError::InvalidArgument {
        name,
        reason: format!("{value} does not fit in usize"),
    })
}

/// Runs a page query with the default [`Pager`].
pub fn get_paged<S: Queryable>(source: S, query: &PageQuery) -> Result<PageResult<S::Item>> {
    Pager::global().get_paged(source, query)
}

/// Chainable query operations on every [`Queryable`].
///
/// ```
/// # use once_cell::sync::Lazy;
/// # use standout_pager::{FieldKind, Record, Schema, Value};
/// use standout_pager::{PageQuery, QueryableExt, SliceSource};
///
/// # struct Task { title: String, priority: i64 }
/// # static SCHEMA: Lazy<Schema<Task>> = Lazy::new(|| {
/// #     Schema::<Task>::builder()
/// #         .field("title", FieldKind::String, |t| Value::from(&t.title))
/// #         .field("priority", FieldKind::Int, |t| Value::from(t.priority))
/// #         .build()
/// #         .unwrap()
/// # });
/// # impl Record for Task {
/// #     fn schema() -> &'static Schema<Self> { &SCHEMA }
/// # }
/// let tasks: Vec<Task> = (1..=25)
///     .map(|i| Task { title: format!("Task {i}"), priority: i % 3 })
///     .collect();
///
/// let page = tasks
///     .as_source()
///     .where_not_equals("priority", "0")?
///     .order_by_descending("title")
///     .get_paged(&PageQuery::new(2, 5))?;
/// assert_eq!(page.row_count, 17);
/// assert_eq!(page.page_count, 4);
/// assert!(page.has_next_page());
/// # Ok::<(), standout_pager::PagerError>(())
/// ```
pub trait QueryableExt: Queryable {
    /// Runs a page query with the default [`Pager`].
    fn get_paged(self, query: &PageQuery) -> Result<PageResult<Self::Item>> {
        get_paged(self, query)
    }

    /// See [`Pager::where_filtered`].
    fn where_filtered(self, filters: &[Filter]) -> Result<Self> {
        Pager::global().where_filtered(self, filters)
    }

    fn where_equals(self, field: &str, value: &str) -> Result<Self> {
        self.where_filtered(&[Filter::equals(field, value)])
    }

    fn where_not_equals(self, field: &str, value: &str) -> Result<Self> {
        self.where_filtered(&[Filter::not_equals(field, value)])
    }

    /// Case-insensitive contains / starts-with / ends-with on a string field.
    fn where_like(self, field: &str, value: &str, option: LikeOption) -> Result<Self> {
        self.where_filtered(&[Filter::new(field, option.into(), value)])
    }

    /// See [`Pager::where_likes`].
    fn where_likes(
        self,
        fields: &[&str],
        words: &[&str],
        option: LikeOption,
        connector: LogicalConnector,
    ) -> Result<Self> {
        Pager::global().where_likes(self, fields, words, option, connector)
    }

    /// Orders ascending by a field; unknown fields are ignored.
    fn order_by_ascending(self, field: &str) -> Self {
        order_source(self, Some(&Sort::new(field, Dir::Asc)))
    }

    /// Orders descending by a field; unknown fields are ignored.
    fn order_by_descending(self, field: &str) -> Self {
        order_source(self, Some(&Sort::new(field, Dir::Desc)))
    }
}

impl<S: Queryable> QueryableExt for S {}
