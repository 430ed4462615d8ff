//! Provide one-off path reads and writes.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use inspect_value::{Value, ValueCastError};

use crate::accessor::collect_segments;
use crate::hierarchy::Hierarchy;
use crate::{AccessPath, AssignMode, ParseError, PathAccessError, Segment};

// -----------------------------------------------------------------------------
// Free functions

/// Splits `path` into its segments.
///
/// # Examples
///
/// ```
/// use inspect_path::{Segment, tokenize};
///
/// let segments = tokenize("weapons[0].stats").unwrap();
/// assert_eq!(segments, [Segment::Index("weapons".into(), 0), Segment::Field("stats".into())]);
///
/// assert!(tokenize("a[x]").is_err());
/// assert!(tokenize("").is_err());
/// ```
pub fn tokenize(path: &str) -> Result<Vec<Segment<'_>>, ParseError<'_>> {
    path.parse_to_segments()
        .map(|res| res.map(|it| it.segment))
        .collect()
}

/// Reads the value at `path` below `root`.
///
/// Missing fields read as [`Value::Null`]; out-of-range indices and index
/// steps over non-sequences are errors.
///
/// # Examples
///
/// ```
/// use inspect_path::resolve_value;
/// use inspect_value::{Record, Value};
///
/// let root = Value::Record(Record::new("Unit").with_field("hp", 10));
/// assert_eq!(resolve_value(&root, "hp").unwrap(), Value::Int(10));
/// assert_eq!(resolve_value(&root, "mp").unwrap(), Value::Null);
/// ```
#[inline]
pub fn resolve_value<'a>(root: &Value, path: &'a str) -> Result<Value, PathAccessError<'a>> {
    root.access(path)
}

/// Writes `value` at `path` below every root, with [`AssignMode::ValidateFirst`].
///
/// # Examples
///
/// ```
/// use inspect_path::{assign_value, resolve_value};
/// use inspect_value::{ObjectRef, Record, Value};
///
/// let unit = || Value::Object(ObjectRef::new(Record::new("Unit").with_field("hp", 10)));
/// let mut roots = [unit(), unit()];
///
/// assign_value(&mut roots, "hp", Value::from(3)).unwrap();
/// for root in &roots {
///     assert_eq!(resolve_value(root, "hp").unwrap(), Value::Int(3));
/// }
/// ```
#[inline]
pub fn assign_value<'a>(
    roots: &mut [Value],
    path: &'a str,
    value: Value,
) -> Result<(), PathAccessError<'a>> {
    assign_value_with(roots, path, value, AssignMode::default())
}

/// Writes `value` at `path` below every root with the given [`AssignMode`].
pub fn assign_value_with<'a>(
    roots: &mut [Value],
    path: &'a str,
    value: Value,
    mode: AssignMode,
) -> Result<(), PathAccessError<'a>> {
    let segments = collect_segments(path)?;
    crate::assign::assign_all(roots, &segments, value, mode)
}

// -----------------------------------------------------------------------------
// Trait for once multi-layer accessing

/// Provide single full path read and write methods.
///
/// This will parse the path during access. If a path needs to be reused,
/// consider using [`PathAccessor`](crate::PathAccessor), which only needs to
/// be parsed once.
///
/// # Examples
///
/// ```
/// use inspect_path::PathAccess;
/// use inspect_value::{Record, Value};
///
/// let mut root = Value::Record(
///     Record::new("Transform")
///         .with_field("position", Record::new("Vec2").with_field("x", 0.0).with_field("y", 0.0)),
/// );
///
/// root.assign("position.x", 1.5).unwrap();
/// assert_eq!(root.access_as::<f64>("position.x").unwrap(), 1.5);
/// assert_eq!(root.access("position.y").unwrap(), Value::Float(0.0));
/// ```
pub trait PathAccess {
    /// Returns a copy of the value specified by `path`.
    fn access<'b>(&self, path: impl AccessPath<'b>) -> Result<Value, PathAccessError<'b>>;

    /// Returns the value specified by `path`, converted to `T`.
    fn access_as<'b, T>(&self, path: impl AccessPath<'b>) -> Result<T, PathAccessError<'b>>
    where
        T: TryFrom<Value, Error = ValueCastError>;

    /// Writes `value` at `path`, rewriting every ancestor slot bottom-up.
    fn assign<'b>(
        &mut self,
        path: impl AccessPath<'b>,
        value: impl Into<Value>,
    ) -> Result<(), PathAccessError<'b>>;
}

impl PathAccess for Value {
    fn access<'b>(&self, path: impl AccessPath<'b>) -> Result<Value, PathAccessError<'b>> {
        path.parse_to_segments()
            .try_fold(Cow::Borrowed(self), |it, res| -> Result<_, PathAccessError<'b>> {
                let segment = res?;
                Ok(Cow::Owned(segment.read(&it)?))
            })
            .map(Cow::into_owned)
    }

    #[inline]
    fn access_as<'b, T>(&self, path: impl AccessPath<'b>) -> Result<T, PathAccessError<'b>>
    where
        T: TryFrom<Value, Error = ValueCastError>,
    {
        Ok(T::try_from(self.access(path)?)?)
    }

    fn assign<'b>(
        &mut self,
        path: impl AccessPath<'b>,
        value: impl Into<Value>,
    ) -> Result<(), PathAccessError<'b>> {
        let segments = collect_segments(path)?;
        Hierarchy::capture(self, &segments)?.rewrite(self, &segments, value.into())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use inspect_value::{ListRef, ObjectRef, Record, SlotError, Value, ValueKind};

    use super::{PathAccess, assign_value, resolve_value};
    use crate::PathAccessError;

    #[test]
    fn read_reports_first_failure_in_path_order() {
        let root = Value::Record(Record::new("A").with_field("items", vec![Value::Int(1)]));
        let err = root.access("items[3].b[x]").unwrap_err();
        assert_eq!(
            err.slot_error(),
            Some(&SlotError::IndexOutOfRange { index: 3, len: 1 })
        );
        let err = root.access("items[0].b[x]").unwrap_err();
        assert!(matches!(err, PathAccessError::ParseError(_)));
    }

    #[test]
    fn index_over_non_sequence_is_mismatch() {
        let root = Value::Record(Record::new("A").with_field("n", 3));
        let err = resolve_value(&root, "n[0]").unwrap_err();
        assert_eq!(err.slot_error(), Some(&SlotError::NotIterable(ValueKind::Int)));
    }

    #[test]
    fn string_elements_read_but_do_not_write() {
        let mut root = Value::Record(Record::new("A").with_field("name", "ada"));
        assert_eq!(root.access("name[1]"), Ok(Value::Char('d')));
        let err = root.assign("name[1]", 'x').unwrap_err();
        assert_eq!(err.slot_error(), Some(&SlotError::NotWritable(ValueKind::Str)));
    }

    #[test]
    fn shared_list_in_value_record_chain() {
        let list = ListRef::new(vec![Value::Record(Record::new("Slot").with_field("qty", 1))]);
        let mut roots = [Value::Object(ObjectRef::new(
            Record::new("Bag").with_field("inner", Record::new("Pocket").with_field("slots", list.clone())),
        ))];
        assign_value(&mut roots, "inner.slots[0].qty", Value::Int(8)).unwrap();
        assert_eq!(resolve_value(&roots[0], "inner.slots[0].qty"), Ok(Value::Int(8)));
        assert_eq!(list.borrow()[0], Value::Record(Record::new("Slot").with_field("qty", 8)));
    }
}
