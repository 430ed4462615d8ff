//! Provide the read walk and the capture-then-rewrite write walk.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use inspect_value::Value;

use crate::{AccessError, OffsetSegment};

// -----------------------------------------------------------------------------
// Read

/// Resolves the non-empty `segments` in order starting from `root`.
///
/// Each step yields an owned value, so value-typed nodes are copied along
/// the way.
pub(crate) fn read<'a>(root: &Value, segments: &[OffsetSegment<'a>]) -> Result<Value, AccessError<'a>> {
    debug_assert!(!segments.is_empty());
    segments
        .iter()
        .try_fold(Cow::Borrowed(root), |it, segment| segment.read(&it).map(Cow::Owned))
        .map(Cow::into_owned)
}

// -----------------------------------------------------------------------------
// Hierarchy

/// The intermediate nodes visited while resolving a path for writing.
///
/// For a path of `N` segments the hierarchy is `root` followed by the `N - 1`
/// nodes resolved from the first `N - 1` segments. The root stays borrowed
/// from the caller; only the intermediates are held here, as owned copies
/// for value-typed nodes and as shared handles for reference-typed ones.
///
/// A hierarchy is transient: build it with [`capture`](Self::capture) and
/// consume it with [`rewrite`](Self::rewrite) against the same root and path.
#[derive(Debug)]
pub(crate) struct Hierarchy {
    nodes: Vec<Value>,
}

impl Hierarchy {
    /// Walks `segments` from `root`, keeping every intermediate node.
    ///
    /// A missing field is an error here. The last segment is only probed, so
    /// every failure a later [`rewrite`](Self::rewrite) could hit on an
    /// unchanged graph is reported before anything is mutated.
    pub(crate) fn capture<'a>(
        root: &Value,
        segments: &[OffsetSegment<'a>],
    ) -> Result<Self, AccessError<'a>> {
        let Some((leaf, parents)) = segments.split_last() else {
            return Ok(Self { nodes: Vec::new() });
        };

        let mut nodes = Vec::with_capacity(parents.len());
        for segment in parents {
            let next = segment.resolve(nodes.last().unwrap_or(root))?;
            nodes.push(next);
        }
        leaf.probe(nodes.last().unwrap_or(root))?;

        Ok(Self { nodes })
    }

    /// Installs `value` at the end of the path, then re-installs every
    /// intermediate into its parent, deepest first, finishing with the slot
    /// directly on `root`.
    ///
    /// The root binding itself is never replaced.
    pub(crate) fn rewrite<'a>(
        self,
        root: &mut Value,
        segments: &[OffsetSegment<'a>],
        value: Value,
    ) -> Result<(), AccessError<'a>> {
        let Some((first, rest)) = segments.split_first() else {
            return Ok(());
        };
        debug_assert_eq!(rest.len(), self.nodes.len());

        let mut carried = value;
        for (segment, mut node) in rest.iter().rev().zip(self.nodes.into_iter().rev()) {
            segment.install(&mut node, carried)?;
            log::trace!("rewrote `{}` on a {} node", segment.segment, node.kind());
            carried = node;
        }
        first.install(root, carried)?;
        log::trace!("rewrote `{}` on the root", first.segment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use inspect_value::{FieldAccessible, ListRef, Record, SlotError, Value, ValueKind};

    use super::{Hierarchy, read};
    use crate::{AccessPath, OffsetSegment};

    fn segments(path: &str) -> Vec<OffsetSegment<'_>> {
        path.parse_to_segments().map(Result::unwrap).collect()
    }

    fn stats(damage: i64) -> Value {
        Value::Record(Record::new("Stats").with_field("damage", damage))
    }

    fn weapon(damage: i64) -> Value {
        Value::Record(Record::new("Weapon").with_field("stats", stats(damage)))
    }

    fn armory() -> Value {
        Value::Record(
            Record::new("Armory").with_field("weapons", ListRef::new(vec![weapon(1), weapon(2)])),
        )
    }

    #[test]
    fn capture_keeps_intermediates() {
        let root = armory();
        let path = segments("weapons[1].stats.damage");
        let hierarchy = Hierarchy::capture(&root, &path).unwrap();
        assert_eq!(hierarchy.nodes, [weapon(2), stats(2)]);
    }

    #[test]
    fn capture_is_strict_about_missing_fields() {
        let root = armory();
        let path = segments("weapons[0].ammo.count");
        let err = Hierarchy::capture(&root, &path).unwrap_err();
        assert_eq!(err.kind(), &SlotError::MissingField(ValueKind::Record));
        assert_eq!(err.offset(), Some(11));

        let path = segments("weapons[0].stats.range");
        let err = Hierarchy::capture(&root, &path).unwrap_err();
        assert_eq!(err.offset(), Some(17));
    }

    #[test]
    fn leaf_only_write_is_lost_on_copies() {
        let root = armory();
        let path = segments("weapons[0].stats.damage");
        let hierarchy = Hierarchy::capture(&root, &path).unwrap();

        // Writing into the deepest captured copy alone leaves the graph untouched.
        let mut leaf_parent = hierarchy.nodes.last().cloned().unwrap();
        leaf_parent.set_field("damage", Value::Int(50)).unwrap();
        assert_eq!(read(&root, &path), Ok(Value::Int(1)));
    }

    #[test]
    fn rewrite_folds_copies_back() {
        let mut root = armory();
        let path = segments("weapons[0].stats.damage");
        let hierarchy = Hierarchy::capture(&root, &path).unwrap();
        hierarchy.rewrite(&mut root, &path, Value::Int(50)).unwrap();

        assert_eq!(read(&root, &path), Ok(Value::Int(50)));
        assert_eq!(read(&root, &segments("weapons[1].stats.damage")), Ok(Value::Int(2)));
    }

    #[test]
    fn single_segment_path_writes_root_slot() {
        let mut root = stats(1);
        let path = segments("damage");
        let hierarchy = Hierarchy::capture(&root, &path).unwrap();
        assert!(hierarchy.nodes.is_empty());
        hierarchy.rewrite(&mut root, &path, Value::Int(7)).unwrap();
        assert_eq!(root, stats(7));
    }

    #[test]
    fn read_tolerates_missing_fields() {
        let root = armory();
        assert_eq!(read(&root, &segments("weapons[0].ammo.count")), Ok(Value::Null));
    }
}
