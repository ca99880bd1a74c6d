//! Property-accessor tables.
//!
//! A [`Schema`] maps each public field name of a record type to a typed
//! getter and its declared [`FieldKind`]. It is built once per record
//! type and consulted by the predicate and ordering compilers instead of
//! inspecting the type at call time.
//!
//! # Example
//!
//! ```
//! use once_cell::sync::Lazy;
//! use standout_pager::{FieldKind, Record, Schema, Value};
//!
//! struct Task {
//!     name: String,
//!     priority: u8,
//! }
//!
//! static TASK_SCHEMA: Lazy<Schema<Task>> = Lazy::new(|| {
//!     Schema::<Task>::builder()
//!         .field("name", FieldKind::String, |t| Value::from(&t.name))
//!         .field("priority", FieldKind::UInt, |t| Value::from(t.priority))
//!         .build()
//!         .expect("valid task schema")
//! });
//!
//! impl Record for Task {
//!     fn schema() -> &'static Schema<Self> {
//!         &TASK_SCHEMA
//!     }
//! }
//!
//! let task = Task { name: "Write docs".into(), priority: 3 };
//! assert_eq!(task.field_value("name"), Value::String("Write docs"));
//! assert_eq!(task.field_value("Name"), Value::None);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::SchemaError;
use crate::value::Value;

/// Getter extracting one field from a record.
pub type Getter<T> = for<'a> fn(&'a T) -> Value<'a>;

/// Declared type of a record field.
///
/// The kind decides which parser turns filter strings into literals and
/// which operators apply to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Floating point.
    Float,
    /// String.
    String,
    /// Single character.
    Char,
    /// Boolean.
    Bool,
    /// Date and time.
    DateTime,
    /// Enumeration; variant names in discriminant order.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Kind for an enum implementing [`FieldEnum`].
    pub fn of_enum<E: FieldEnum>() -> Self {
        FieldKind::Enum(E::VARIANTS)
    }

    /// Returns the parser-registry tag of this kind.
    pub fn tag(self) -> KindTag {
        match self {
            FieldKind::Int => KindTag::Int,
            FieldKind::UInt => KindTag::UInt,
            FieldKind::Float => KindTag::Float,
            FieldKind::String => KindTag::String,
            FieldKind::Char => KindTag::Char,
            FieldKind::Bool => KindTag::Bool,
            FieldKind::DateTime => KindTag::DateTime,
            FieldKind::Enum(_) => KindTag::Enum,
        }
    }

    /// Returns `true` if pattern (like) filters apply to this kind.
    pub fn supports_like(self) -> bool {
        matches!(self, FieldKind::String)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().as_str())
    }
}

/// Payload-free discriminant of [`FieldKind`], used as registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Int,
    UInt,
    Float,
    String,
    Char,
    Bool,
    DateTime,
    Enum,
}

impl KindTag {
    /// All tags, in declaration order.
    pub const ALL: [KindTag; 8] = [
        KindTag::Int,
        KindTag::UInt,
        KindTag::Float,
        KindTag::String,
        KindTag::Char,
        KindTag::Bool,
        KindTag::DateTime,
        KindTag::Enum,
    ];

    /// Returns the display name of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            KindTag::Int => "int",
            KindTag::UInt => "uint",
            KindTag::Float => "float",
            KindTag::String => "string",
            KindTag::Char => "char",
            KindTag::Bool => "bool",
            KindTag::DateTime => "datetime",
            KindTag::Enum => "enum",
        }
    }
}

/// One registered field: name, declared kind and getter.
pub struct FieldDef<T> {
    name: String,
    kind: FieldKind,
    getter: Getter<T>,
}

impl<T> FieldDef<T> {
    /// Field name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Reads this field from a record.
    pub fn value<'a>(&self, record: &'a T) -> Value<'a> {
        (self.getter)(record)
    }
}

impl<T> Clone for FieldDef<T> {
    fn clone(&self) -> Self {
        FieldDef {
            name: self.name.clone(),
            kind: self.kind,
            getter: self.getter,
        }
    }
}

impl<T> fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Property-accessor table for a record type.
pub struct Schema<T> {
    fields: Vec<FieldDef<T>>,
    index: HashMap<String, usize>,
}

impl<T> Schema<T> {
    /// Starts building a schema.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Looks up a field by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&FieldDef<T>> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Resolves a possibly absent field name.
    ///
    /// Absent and empty names never resolve.
    pub fn resolve(&self, name: Option<&str>) -> Option<&FieldDef<T>> {
        match name {
            Some(name) if !name.is_empty() => self.get(name),
            _ => None,
        }
    }

    /// Registered fields, in registration order.
    pub fn fields(&self) -> &[FieldDef<T>] {
        &self.fields
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Builder for [`Schema`]. Structural mistakes surface from [`build`].
///
/// [`build`]: SchemaBuilder::build
pub struct SchemaBuilder<T> {
    fields: Vec<FieldDef<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Registers a field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, getter: Getter<T>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            getter,
        });
        self
    }

    /// Validates the registrations and freezes the table.
    pub fn build(self) -> Result<Schema<T>, SchemaError> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if let FieldKind::Enum(variants) = field.kind {
                if variants.is_empty() {
                    return Err(SchemaError::EmptyEnum(field.name.clone()));
                }
            }
            if index.insert(field.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Schema {
            fields: self.fields,
            index,
        })
    }
}

/// Record types that can be filtered, ordered and paged.
pub trait Record: Sized + 'static {
    /// The accessor table of this type, built once.
    fn schema() -> &'static Schema<Self>;

    /// Reads a field by name, or [`Value::None`] for unknown names.
    fn field_value(&self, field: &str) -> Value<'_> {
        Self::schema()
            .get(field)
            .map_or(Value::None, |def| def.value(self))
    }
}

/// Enums usable as record fields.
///
/// Filter values are matched case-insensitively against `VARIANTS`; the
/// position in `VARIANTS` is the discriminant.
///
/// ```
/// use standout_pager::{FieldEnum, FieldKind};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Pending,
///     Active,
/// }
///
/// impl FieldEnum for Status {
///     const VARIANTS: &'static [&'static str] = &["Pending", "Active"];
///
///     fn ordinal(&self) -> u32 {
///         *self as u32
///     }
/// }
///
/// assert_eq!(FieldKind::of_enum::<Status>(), FieldKind::Enum(&["Pending", "Active"]));
/// ```
pub trait FieldEnum {
    /// Variant names in discriminant order.
    const VARIANTS: &'static [&'static str];

    /// Position of this variant in `VARIANTS`.
    fn ordinal(&self) -> u32;
}
