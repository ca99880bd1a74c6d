//! Runtime value types for field comparison.
//!
//! [`Value`] is what a field getter returns for one record, borrowed from
//! it. [`Literal`] is the owned, parsed form of a filter value that gets
//! stored inside a compiled [`Condition`](crate::Condition).

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;

use crate::schema::FieldEnum;

/// Textual form used to print date/time literals. It re-parses exactly.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use standout_pager::{Number, Value};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// fn name<'a>(p: &'a Person) -> Value<'a> {
///     Value::String(&p.name)
/// }
///
/// fn age(p: &Person) -> Value<'_> {
///     Value::Number(Number::from(p.age))
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Single character.
    Char(char),
    /// Date and time without offset.
    DateTime(NaiveDateTime),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Field absent or null on this record.
    None,
}

impl<'a> Value<'a> {
    /// Builds an enum value from any [`FieldEnum`].
    pub fn from_enum<E: FieldEnum>(value: &E) -> Self {
        Value::Enum(value.ordinal())
    }

    /// Wraps an optional value, mapping `None` to [`Value::None`].
    pub fn from_option<T>(value: Option<T>, f: impl FnOnce(T) -> Value<'a>) -> Self {
        value.map_or(Value::None, f)
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compares this value with a parsed literal.
    ///
    /// Returns `None` when the two are not comparable (kind mismatch, NaN,
    /// or a missing field value).
    pub fn compare_literal(&self, literal: &Literal) -> Option<Ordering> {
        match (self, literal) {
            (Value::String(a), Literal::String(b)) => Some((*a).cmp(b.as_str())),
            (Value::Number(a), Literal::Number(b)) => a.compare(*b),
            (Value::Char(a), Literal::Char(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Literal::DateTime(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Literal::Enum(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Tests this value for equality with a parsed literal.
    ///
    /// Returns `None` for a kind mismatch or a missing field value. NaN is
    /// a number like any other here and equals nothing.
    pub fn equals_literal(&self, literal: &Literal) -> Option<bool> {
        match (self, literal) {
            (Value::Number(a), Literal::Number(b)) => Some(a.compare(*b) == Some(Ordering::Equal)),
            _ => self
                .compare_literal(literal)
                .map(|o| o == Ordering::Equal),
        }
    }

    /// Returns `true` for a missing value or NaN, both of which sort last.
    pub fn sorts_last(&self) -> bool {
        match self {
            Value::None => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value<'_> {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<NaiveDateTime> for Value<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::String(s.as_str())
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Numeric value supporting all common numeric types.
///
/// Numbers keep their signedness to preserve precision. Comparisons
/// between different variants fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Integers of different signedness stay exact.
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Returns `true` if this is a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Total ordering for sorting: NaN sorts after every other number and
    /// all NaNs compare equal.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (false, false) => self.compare(other).unwrap_or(Ordering::Equal),
            (a, b) => a.cmp(&b),
        }
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Owned, parsed filter value.
///
/// Unlike [`Value`], which borrows from a record, a literal owns its data
/// so it can live inside a compiled condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Single character.
    Char(char),
    /// Date and time without offset.
    DateTime(NaiveDateTime),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
            Literal::Enum(d) => write!(f, "#{d}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Formats a date/time in the round-trippable textual form.
///
/// ```
/// use chrono::NaiveDate;
/// use standout_pager::format_datetime;
///
/// let dt = NaiveDate::from_ymd_opt(1990, 10, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(format_datetime(&dt), "1990-10-20T00:00:00");
/// ```
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}
