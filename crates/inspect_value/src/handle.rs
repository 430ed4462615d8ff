//! Reference-typed graph nodes.
//!
//! Both handles are single-threaded (`Rc<RefCell<_>>`). Borrows taken by
//! this workspace never outlive a single field or element operation.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use crate::{Record, Value};

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to a [`Record`].
///
/// Cloning the handle does not clone the record: every clone observes
/// writes made through any other.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Record>>);

impl ObjectRef {
    #[inline]
    pub fn new(record: Record) -> Self {
        Self(Rc::new(RefCell::new(record)))
    }

    /// Immutably borrows the record.
    ///
    /// # Panics
    ///
    /// Panics if the record is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Record> {
        self.0.borrow()
    }

    /// Mutably borrows the record.
    ///
    /// # Panics
    ///
    /// Panics if the record is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Record> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point to the same record.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Record> for ObjectRef {
    #[inline]
    fn from(value: Record) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(record) => write!(f, "ObjectRef({})", record.type_name()),
            Err(_) => f.write_str("ObjectRef(<borrowed>)"),
        }
    }
}

// -----------------------------------------------------------------------------
// ListRef

/// A shared, resizable sequence of values.
///
/// Elements can be replaced in place; the change is visible through every
/// handle without writing the handle back into its parent.
#[derive(Clone, Default)]
pub struct ListRef(Rc<RefCell<Vec<Value>>>);

impl ListRef {
    #[inline]
    pub fn new(values: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<Value> for ListRef {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(values) => write!(f, "ListRef(len = {})", values.len()),
            Err(_) => f.write_str("ListRef(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use super::{ListRef, ObjectRef};
    use crate::{Record, Value};

    #[test]
    fn object_clones_share_state() {
        let object = ObjectRef::new(Record::new("Unit").with_field("hp", 10));
        let alias = object.clone();
        *alias.borrow_mut().field_mut("hp").unwrap() = Value::Int(3);
        assert_eq!(object.borrow().field("hp"), Some(&Value::Int(3)));
        assert!(object.ptr_eq(&alias));
    }

    #[test]
    fn list_in_place_replace() {
        let list = ListRef::new(vec![Value::Int(1), Value::Int(2)]);
        let alias = list.clone();
        alias.borrow_mut()[1] = Value::Int(5);
        assert_eq!(list.len(), 2);
        assert_eq!(list.borrow()[1], Value::Int(5));
    }

    #[test]
    fn debug_does_not_recurse() {
        let object = ObjectRef::new(Record::new("Node"));
        object
            .borrow_mut()
            .insert("next", Default::default(), Value::Object(object.clone()));
        assert_eq!(format!("{object:?}"), "ObjectRef(Node)");
        let list: ListRef = [Value::Null].into_iter().collect();
        assert_eq!(format!("{list:?}"), "ListRef(len = 1)");
    }
}
