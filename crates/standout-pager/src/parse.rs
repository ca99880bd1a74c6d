//! String-to-literal conversion.
//!
//! A [`ParserRegistry`] maps each [`KindTag`] to a parse function turning
//! the untyped filter value into a [`Literal`] of the field's kind. Parse
//! functions never fail loudly: `None` means "this filter does not apply"
//! and the compiler drops it.
//!
//! ```
//! use standout_pager::{FieldKind, Literal, Number, ParserRegistry};
//!
//! let registry = ParserRegistry::global();
//! assert_eq!(
//!     registry.parse(" 42 ", FieldKind::Int),
//!     Some(Literal::Number(Number::I64(42)))
//! );
//! assert_eq!(registry.parse("forty-two", FieldKind::Int), None);
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::schema::{FieldKind, KindTag};
use crate::value::{Literal, Number, DATETIME_FORMAT};

/// Parse function for one kind. Receives the full kind so enum parsers
/// can see the variant names.
pub type ParseFn = fn(&str, FieldKind) -> Option<Literal>;

static GLOBAL: Lazy<ParserRegistry> = Lazy::new(ParserRegistry::new);

/// Registry of parse functions, one per field kind.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<KindTag, ParseFn>,
}

impl ParserRegistry {
    /// Creates a registry with the default parser for every kind.
    pub fn new() -> Self {
        ParserRegistry::empty()
            .with(KindTag::Int, parse_int)
            .with(KindTag::UInt, parse_uint)
            .with(KindTag::Float, parse_float)
            .with(KindTag::String, parse_string)
            .with(KindTag::Char, parse_char)
            .with(KindTag::Bool, parse_bool)
            .with(KindTag::DateTime, parse_datetime)
            .with(KindTag::Enum, parse_enum)
    }

    /// Creates a registry with no parsers. Every filter is then skipped.
    pub fn empty() -> Self {
        ParserRegistry {
            parsers: HashMap::new(),
        }
    }

    /// The shared default registry.
    pub fn global() -> &'static ParserRegistry {
        &GLOBAL
    }

    /// Registers a parser, returning the one it replaces.
    pub fn register(&mut self, tag: KindTag, parser: ParseFn) -> Option<ParseFn> {
        self.parsers.insert(tag, parser)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, tag: KindTag, parser: ParseFn) -> Self {
        self.register(tag, parser);
        self
    }

    /// Returns `true` if a parser is registered for the tag.
    pub fn supports(&self, tag: KindTag) -> bool {
        self.parsers.contains_key(&tag)
    }

    /// Parses a literal for a field of the given kind.
    pub fn parse(&self, literal: &str, kind: FieldKind) -> Option<Literal> {
        let parser = self.parsers.get(&kind.tag())?;
        parser(literal, kind)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        ParserRegistry::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.parsers.keys().map(|t| t.as_str()).collect();
        tags.sort_unstable();
        f.debug_struct("ParserRegistry").field("kinds", &tags).finish()
    }
}

/// Signed integers, surrounding whitespace allowed.
pub fn parse_int(s: &str, _: FieldKind) -> Option<Literal> {
    s.trim()
        .parse::<i64>()
        .ok()
        .map(|n| Literal::Number(Number::I64(n)))
}

/// Unsigned integers, surrounding whitespace allowed.
pub fn parse_uint(s: &str, _: FieldKind) -> Option<Literal> {
    s.trim()
        .parse::<u64>()
        .ok()
        .map(|n| Literal::Number(Number::U64(n)))
}

pub fn parse_float(s: &str, _: FieldKind) -> Option<Literal> {
    s.trim()
        .parse::<f64>()
        .ok()
        .map(|n| Literal::Number(Number::F64(n)))
}

/// Strings are taken verbatim.
pub fn parse_string(s: &str, _: FieldKind) -> Option<Literal> {
    Some(Literal::String(s.to_string()))
}

/// Exactly one character. Longer input is trimmed before the check.
pub fn parse_char(s: &str, _: FieldKind) -> Option<Literal> {
    let s = if s.chars().nth(1).is_some() { s.trim() } else { s };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Literal::Char(c)),
        _ => None,
    }
}

/// `true` / `false`, case-insensitive.
pub fn parse_bool(s: &str, _: FieldKind) -> Option<Literal> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(Literal::Bool(true))
    } else if s.eq_ignore_ascii_case("false") {
        Some(Literal::Bool(false))
    } else {
        None
    }
}

/// RFC 3339 (normalized to UTC), the round-trip form, or a bare date.
pub fn parse_datetime(s: &str, _: FieldKind) -> Option<Literal> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Literal::DateTime(dt.naive_utc()));
    }
    for format in [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Literal::DateTime(dt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Literal::DateTime)
}

/// Variant name, case-insensitive.
pub fn parse_enum(s: &str, kind: FieldKind) -> Option<Literal> {
    let FieldKind::Enum(variants) = kind else {
        return None;
    };
    let s = s.trim();
    variants
        .iter()
        .position(|v| v.eq_ignore_ascii_case(s))
        .map(|i| Literal::Enum(i as u32))
}
