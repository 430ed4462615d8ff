//! Provide the single-node access capability used by path resolution.

use thiserror::Error;

use crate::{Record, Value, ValueKind};

// -----------------------------------------------------------------------------
// Error

/// A failed single-node access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlotError {
    #[error("the {0} accessed has no such field")]
    MissingField(ValueKind),

    #[error("index {index} is out of range for a sequence of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a {0} value does not support element iteration")]
    NotIterable(ValueKind),

    #[error("elements of a {0} value cannot be replaced")]
    NotWritable(ValueKind),
}

// -----------------------------------------------------------------------------
// FieldAccessible

/// Named-slot and element access on a graph node.
///
/// Reads return owned values: a copy for value-typed nodes and another handle
/// for reference-typed ones. This is what makes a write into a read result
/// invisible from the source unless the result is written back.
///
/// Field lookups search the whole inheritance chain and ignore
/// [`Visibility`](crate::Visibility).
///
/// # Examples
///
/// ```
/// use inspect_value::{FieldAccessible, ListRef, Record, Value};
///
/// let mut root = Value::Record(
///     Record::new("Inventory").with_field("items", ListRef::new(vec![Value::from(1)])),
/// );
///
/// let items = root.field("items").unwrap();
/// assert_eq!(items.element(0), Ok(Value::Int(1)));
///
/// root.set_field("items", Value::Null).unwrap();
/// assert_eq!(root.field("items"), Some(Value::Null));
/// assert!(root.field("missing").is_none());
/// ```
pub trait FieldAccessible {
    /// Returns the named field, or `None` if no type in the chain declares it.
    fn field(&self, name: &str) -> Option<Value>;

    /// Replaces the named field.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), SlotError>;

    /// Returns the element at `index` by advancing an iterator `index + 1` times.
    fn element(&self, index: usize) -> Result<Value, SlotError>;

    /// Replaces the element at `index`.
    fn set_element(&mut self, index: usize, value: Value) -> Result<(), SlotError>;

    /// Returns the number of elements, or `None` if the node is not iterable.
    fn element_count(&self) -> Option<usize>;
}

fn nth<'a>(
    mut iter: impl Iterator<Item = &'a Value>,
    index: usize,
    len: usize,
) -> Result<Value, SlotError> {
    iter.nth(index)
        .cloned()
        .ok_or(SlotError::IndexOutOfRange { index, len })
}

impl FieldAccessible for Record {
    #[inline]
    fn field(&self, name: &str) -> Option<Value> {
        Record::field(self, name).cloned()
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), SlotError> {
        let slot = self
            .field_mut(name)
            .ok_or(SlotError::MissingField(ValueKind::Record))?;
        *slot = value;
        Ok(())
    }

    #[inline]
    fn element(&self, _index: usize) -> Result<Value, SlotError> {
        Err(SlotError::NotIterable(ValueKind::Record))
    }

    #[inline]
    fn set_element(&mut self, _index: usize, _value: Value) -> Result<(), SlotError> {
        Err(SlotError::NotIterable(ValueKind::Record))
    }

    #[inline]
    fn element_count(&self) -> Option<usize> {
        None
    }
}

impl FieldAccessible for Value {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Record(record) => record.field(name).cloned(),
            Value::Object(object) => object.borrow().field(name).cloned(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), SlotError> {
        match self {
            Value::Record(record) => FieldAccessible::set_field(record, name, value),
            Value::Object(object) => {
                let mut record = object.borrow_mut();
                let slot = record
                    .field_mut(name)
                    .ok_or(SlotError::MissingField(ValueKind::Object))?;
                *slot = value;
                Ok(())
            }
            other => Err(SlotError::MissingField(other.kind())),
        }
    }

    fn element(&self, index: usize) -> Result<Value, SlotError> {
        match self {
            Value::List(list) => {
                let values = list.borrow();
                nth(values.iter(), index, values.len())
            }
            Value::Array(values) => nth(values.iter(), index, values.len()),
            Value::Str(s) => s
                .chars()
                .nth(index)
                .map(Value::Char)
                .ok_or_else(|| SlotError::IndexOutOfRange {
                    index,
                    len: s.chars().count(),
                }),
            other => Err(SlotError::NotIterable(other.kind())),
        }
    }

    fn set_element(&mut self, index: usize, value: Value) -> Result<(), SlotError> {
        match self {
            Value::List(list) => {
                let mut values = list.borrow_mut();
                let len = values.len();
                let slot = values
                    .get_mut(index)
                    .ok_or(SlotError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(())
            }
            Value::Array(values) => {
                let len = values.len();
                let slot = values
                    .get_mut(index)
                    .ok_or(SlotError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(())
            }
            Value::Str(_) => Err(SlotError::NotWritable(ValueKind::Str)),
            other => Err(SlotError::NotIterable(other.kind())),
        }
    }

    fn element_count(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(list.len()),
            Value::Array(values) => Some(values.len()),
            Value::Str(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{FieldAccessible, SlotError};
    use crate::{ListRef, ObjectRef, Record, Value, ValueKind};

    #[test]
    fn field_read_copies_value_types() {
        let inner = Record::new("B").with_field("x", 1);
        let root = Value::Record(Record::new("A").with_field("inner", inner));
        let mut inner = root.field("inner").unwrap();
        inner.set_field("x", Value::Int(2)).unwrap();
        assert_eq!(root.field("inner").unwrap().field("x"), Some(Value::Int(1)));
    }

    #[test]
    fn field_read_shares_reference_types() {
        let inner = ObjectRef::new(Record::new("B").with_field("x", 1));
        let root = Value::Record(Record::new("A").with_field("inner", inner));
        let mut inner = root.field("inner").unwrap();
        inner.set_field("x", Value::Int(2)).unwrap();
        assert_eq!(root.field("inner").unwrap().field("x"), Some(Value::Int(2)));
    }

    #[test]
    fn set_field_on_primitive_is_missing() {
        let mut value = Value::Int(3);
        assert_eq!(
            value.set_field("x", Value::Null),
            Err(SlotError::MissingField(ValueKind::Int))
        );
        assert!(value.field("x").is_none());
    }

    #[test]
    fn element_access() {
        let list = Value::List(ListRef::new(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        assert_eq!(list.element(2), Ok(Value::Int(3)));
        assert_eq!(
            list.element(3),
            Err(SlotError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(Value::from("héllo").element(1), Ok(Value::Char('é')));
        assert_eq!(
            Value::Null.element(0),
            Err(SlotError::NotIterable(ValueKind::Null))
        );
        assert_eq!(list.element_count(), Some(3));
    }

    #[test]
    fn element_write() {
        let mut array = Value::Array(vec![Value::Int(1)]);
        array.set_element(0, Value::Int(4)).unwrap();
        assert_eq!(array, Value::Array(vec![Value::Int(4)]));
        assert_eq!(
            array.set_element(1, Value::Null),
            Err(SlotError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            Value::from("ab").set_element(0, Value::Char('c')),
            Err(SlotError::NotWritable(ValueKind::Str))
        );
    }
}
