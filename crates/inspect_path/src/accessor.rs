//! Provide the reusable, pre-parsed path.

use alloc::boxed::Box;
use core::fmt;

use fastvec::FastVec;
use inspect_value::{Value, ValueCastError};

use crate::hierarchy::{self, Hierarchy};
use crate::{AccessError, AccessPath, AssignMode, OffsetSegment, ParseError, PathAccessError};

/// Collects every segment of `path`, failing on the first parse error.
pub(crate) fn collect_segments<'a>(
    path: impl AccessPath<'a>,
) -> Result<Box<[OffsetSegment<'a>]>, ParseError<'a>> {
    let mut vec: FastVec<OffsetSegment<'a>, 8> = FastVec::new();
    let data = vec.data();

    for res in path.parse_to_segments() {
        data.push(res?);
    }

    Ok(vec.into_boxed_slice())
}

// -----------------------------------------------------------------------------
// PathAccessor

/// Reusable path, a thin wrapper over `Box<[OffsetSegment]>`.
///
/// The path string is parsed once; reads and writes then walk the stored
/// segments. A `PathAccessor` always holds at least one segment.
///
/// # Examples
///
/// ```
/// use inspect_path::PathAccessor;
/// use inspect_value::{ListRef, Record, Value};
///
/// let stats = Record::new("Stats").with_field("damage", 4);
/// let weapon = Record::new("Weapon").with_field("stats", stats);
/// let weapons = ListRef::new(vec![Value::Record(weapon)]);
/// let mut root = Value::Record(Record::new("Player").with_field("weapons", weapons));
///
/// let accessor = PathAccessor::parse("weapons[0].stats.damage").unwrap();
/// assert_eq!(accessor.len(), 3);
/// assert_eq!(accessor.resolve_as::<i64>(&root).unwrap(), 4);
///
/// accessor.assign(&mut root, Value::from(12)).unwrap();
/// assert_eq!(accessor.resolve(&root).unwrap(), Value::Int(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathAccessor(Box<[OffsetSegment<'static>]>);

impl PathAccessor {
    /// Parses the path and creates a [`PathAccessor`].
    /// Returns [`ParseError`] if parsing fails.
    pub fn parse<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError<'a>> {
        let mut vec: FastVec<OffsetSegment<'static>, 8> = FastVec::new();
        let data = vec.data();

        for res in path.parse_to_segments() {
            data.push(res?.into_owned());
        }

        Ok(Self(vec.into_boxed_slice()))
    }

    /// Returns the number of segments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use inspect_path::PathAccessor;
    /// let accessor = PathAccessor::parse("weapons.Array.data[0].stats").unwrap();
    /// assert_eq!(accessor.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a copy of the value specified by the path.
    ///
    /// Fields missing on the way read as [`Value::Null`].
    #[inline]
    pub fn resolve(&self, root: &Value) -> Result<Value, AccessError<'static>> {
        hierarchy::read(root, &self.0)
    }

    /// Returns the value specified by the path, converted to `T`.
    pub fn resolve_as<T>(&self, root: &Value) -> Result<T, PathAccessError<'static>>
    where
        T: TryFrom<Value, Error = ValueCastError>,
    {
        Ok(T::try_from(self.resolve(root)?)?)
    }

    /// Writes `value` at the path below `root`.
    ///
    /// Every node between `root` and the written slot is re-installed into its
    /// parent, so value-typed intermediates do not swallow the write.
    /// Nothing is mutated if the path cannot be resolved.
    pub fn assign(&self, root: &mut Value, value: Value) -> Result<(), AccessError<'static>> {
        Hierarchy::capture(root, &self.0)?.rewrite(root, &self.0, value)
    }

    /// Writes `value` at the path below each of `roots`.
    ///
    /// See [`AssignMode`] for the behaviour when a root fails.
    #[inline]
    pub fn assign_all(
        &self,
        roots: &mut [Value],
        value: Value,
        mode: AssignMode,
    ) -> Result<(), PathAccessError<'static>> {
        crate::assign::assign_all(roots, &self.0, value, mode)
    }

    /// Appends the segments of `other` after the segments of `self`.
    ///
    /// Offsets are kept as parsed, so errors from the appended part point
    /// into `other`'s own path string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use inspect_path::PathAccessor;
    /// let a1 = PathAccessor::parse("position").unwrap();
    /// let a2 = PathAccessor::parse("x").unwrap();
    /// let a = a1.concat(a2);
    /// assert_eq!(a.to_string(), "position.x");
    /// ```
    pub fn concat(self, other: PathAccessor) -> Self {
        let mut vec: FastVec<OffsetSegment<'static>, 12> = FastVec::new();
        let data = vec.data();
        data.extend(self.0);
        data.extend(other.0);
        Self(vec.into_boxed_slice())
    }
}

impl fmt::Display for PathAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, it) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(&it.segment, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use inspect_value::{ListRef, ObjectRef, Record, SlotError, Value, ValueKind};

    use super::PathAccessor;
    use crate::{AssignMode, PathAccessError};

    #[test]
    fn parse_owned_string() {
        let path = String::from("a.Array.data[2].b");
        let accessor = PathAccessor::parse(&path).unwrap();
        drop(path);
        assert_eq!(accessor.to_string(), "a[2].b");
    }

    #[test]
    fn resolve_as_reports_downcast() {
        let root = Value::Record(Record::new("A").with_field("flag", true));
        let accessor = PathAccessor::parse("flag").unwrap();
        assert_eq!(accessor.resolve_as::<bool>(&root), Ok(true));
        assert!(matches!(
            accessor.resolve_as::<i64>(&root),
            Err(PathAccessError::InvalidDowncast(_))
        ));
    }

    #[test]
    fn failed_assign_mutates_nothing() {
        let items = ListRef::new(vec![Value::Int(1)]);
        let mut root = Value::Record(
            Record::new("A")
                .with_field("items", items.clone())
                .with_field("count", 1),
        );
        let before = root.clone();
        let accessor = PathAccessor::parse("items[1]").unwrap();
        let err = accessor.assign(&mut root, Value::Int(5)).unwrap_err();
        assert_eq!(err.kind(), &SlotError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(root, before);
        assert_eq!(items.borrow()[0], Value::Int(1));
    }

    #[test]
    fn assign_all_over_objects() {
        let player = || Record::new("P").with_field("pos", Record::new("V").with_field("x", 0.0));
        let a = ObjectRef::new(player());
        let b = ObjectRef::new(player());
        let mut roots = [Value::Object(a.clone()), Value::Object(b.clone())];
        let accessor = PathAccessor::parse("pos.x").unwrap();
        accessor
            .assign_all(&mut roots, Value::Float(2.5), AssignMode::default())
            .unwrap();
        for object in [a, b] {
            assert_eq!(
                accessor.resolve(&Value::Object(object)),
                Ok(Value::Float(2.5))
            );
        }
    }

    #[test]
    fn write_into_primitive_is_missing_field() {
        let mut root = Value::Record(Record::new("A").with_field("n", 3));
        let err = PathAccessor::parse("n.x")
            .unwrap()
            .assign(&mut root, Value::Null)
            .unwrap_err();
        assert_eq!(err.kind(), &SlotError::MissingField(ValueKind::Int));
    }
}
