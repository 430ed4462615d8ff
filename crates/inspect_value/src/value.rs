use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{ListRef, ObjectRef, Record};

// -----------------------------------------------------------------------------
// ValueKind

/// The shape of a [`Value`], without its payload.
///
/// Mostly used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Char,
    Str,
    Record,
    Array,
    Object,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::Str => "string",
            Self::Record => "record",
            Self::Array => "array",
            Self::Object => "object",
            Self::List => "list",
        })
    }
}

// -----------------------------------------------------------------------------
// Value

/// A node of an object graph.
///
/// Variants fall into two groups:
///
/// - value semantics: primitives, [`Record`] and `Array`. Cloning produces an
///   independent copy, so writing into a clone is invisible to the source.
/// - reference semantics: [`ObjectRef`] and [`ListRef`]. Cloning produces
///   another handle to the same node, so writes are visible through every handle.
///
/// `Null` doubles as the "absent" result of a tolerant read.
///
/// # Equality
///
/// Value-typed variants compare by content, reference-typed variants compare
/// by identity, see [`ObjectRef::ptr_eq`] and [`ListRef::ptr_eq`].
///
/// # Examples
///
/// ```
/// use inspect_value::{ListRef, Value};
///
/// let a = Value::from(vec![Value::from(1), Value::from(2)]);
/// let mut b = a.clone();
/// if let Value::Array(items) = &mut b {
///     items[0] = Value::from(10);
/// }
/// assert_ne!(a, b);
///
/// let shared = Value::List(ListRef::new(vec![Value::from(1)]));
/// let alias = shared.clone();
/// if let Value::List(list) = &alias {
///     list.borrow_mut()[0] = Value::from(10);
/// }
/// assert_eq!(shared, alias);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Record(Record),
    Array(Vec<Value>),
    Object(ObjectRef),
    List(ListRef),
}

impl Value {
    /// Returns the [`ValueKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Char(_) => ValueKind::Char,
            Self::Str(_) => ValueKind::Str,
            Self::Record(_) => ValueKind::Record,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::List(_) => ValueKind::List,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::List(a), Self::List(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Shared nodes are printed by type and size only, so cyclic graphs terminate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Record(record) => fmt::Display::fmt(record, f),
            Self::Array(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Object(object) => write!(f, "&{}", object.borrow().type_name()),
            Self::List(list) => write!(f, "&[..; {}]", list.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{Value, ValueKind};
    use crate::{ListRef, ObjectRef, Record};

    #[test]
    fn value_typed_clone_is_detached() {
        let original = Value::Record(Record::new("Stats").with_field("damage", 3));
        let mut copy = original.clone();
        if let Value::Record(record) = &mut copy {
            *record.field_mut("damage").unwrap() = Value::Int(9);
        }
        assert_ne!(original, copy);
    }

    #[test]
    fn reference_typed_equality_is_identity() {
        let a = ObjectRef::new(Record::new("Unit"));
        let b = ObjectRef::new(Record::new("Unit"));
        assert_eq!(Value::Object(a.clone()), Value::Object(a));
        assert_ne!(
            Value::Object(b),
            Value::Object(ObjectRef::new(Record::new("Unit")))
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
    }

    #[test]
    fn display_stops_at_shared_nodes() {
        let list = ListRef::new(vec![Value::Int(1), Value::Int(2)]);
        let value = Value::Array(vec![Value::Int(1), Value::List(list), Value::from("a")]);
        assert_eq!(value.to_string(), "[1, &[..; 2], \"a\"]");
    }
}
