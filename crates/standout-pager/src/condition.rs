//! Compiled, composable filter conditions.
//!
//! A [`Condition`] is a small tagged tree. The in-memory source evaluates
//! it with [`Condition::matches`]; other backends walk the tree and
//! translate it into their own predicate form (a like condition keeps its
//! `%` pattern for that purpose).

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::op::{CompareOp, LikeOption};
use crate::schema::Record;
use crate::value::Literal;

/// Boolean condition over one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the literal.
    Equals { field: String, value: Literal },
    /// Field differs from the literal.
    NotEquals { field: String, value: Literal },
    /// Ordering comparison of field against literal.
    Compare {
        field: String,
        op: CompareOp,
        value: Literal,
    },
    /// Case-insensitive pattern match on a string field.
    Like {
        field: String,
        option: LikeOption,
        pattern: LikePattern,
    },
    /// Both sides hold.
    And(Box<Condition>, Box<Condition>),
    /// Either side holds.
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Conjoins two conditions.
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// Disjoins two conditions.
    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates this condition against a record.
    ///
    /// A field that is missing on the record, or whose value is of another
    /// kind than the literal, never matches (not even `NotEquals`). NaN
    /// equals nothing, so it satisfies `NotEquals` and no other comparison.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            Condition::Equals { field, value } => {
                record.field_value(field).equals_literal(value) == Some(true)
            }
            Condition::NotEquals { field, value } => {
                record.field_value(field).equals_literal(value) == Some(false)
            }
            Condition::Compare { field, op, value } => record
                .field_value(field)
                .compare_literal(value)
                .is_some_and(|o| op.eval_ordering(o)),
            Condition::Like { field, pattern, .. } => record
                .field_value(field)
                .as_str()
                .is_some_and(|s| pattern.is_match(s)),
            Condition::And(left, right) => left.matches(record) && right.matches(record),
            Condition::Or(left, right) => left.matches(record) || right.matches(record),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Equals { field, value } => write!(f, "{field} eq {value}"),
            Condition::NotEquals { field, value } => write!(f, "{field} ne {value}"),
            Condition::Compare { field, op, value } => write!(f, "{field} {op} {value}"),
            Condition::Like { field, pattern, .. } => write!(f, "{field} like {:?}", pattern.as_str()),
            Condition::And(left, right) => write!(f, "({left} and {right})"),
            Condition::Or(left, right) => write!(f, "({left} or {right})"),
        }
    }
}

/// SQL `LIKE` pattern: `%` matches any run of characters, `_` exactly one.
/// Matching ignores case.
///
/// ```
/// use standout_pager::LikePattern;
///
/// let pattern = LikePattern::new("%name 1_").unwrap();
/// assert!(pattern.is_match("Firstname 10"));
/// assert!(pattern.is_match("LASTNAME 19"));
/// assert!(!pattern.is_match("Firstname 1"));
/// ```
#[derive(Debug, Clone)]
pub struct LikePattern {
    pattern: String,
    regex: Regex,
}

impl LikePattern {
    /// Compiles a pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        let mut buf = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '%' => source.push_str(".*"),
                '_' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        source.push('$');
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(LikePattern { pattern, regex })
    }

    /// Builds `%value%`, `value%` or `%value` and compiles it.
    pub fn with_option(value: &str, option: LikeOption) -> Result<Self, regex::Error> {
        LikePattern::new(option.pattern(value))
    }

    /// The pattern text, wildcards included.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Tests a string against the pattern.
    pub fn is_match(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}
