use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Value;
use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// Field

/// Declared accessibility of a field.
///
/// Purely descriptive: path resolution reaches every field regardless of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A named slot declared by one type of a [`Record`]'s inheritance chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: Cow<'static, str>,
    visibility: Visibility,
    value: Value,
}

impl Field {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub const fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}

/// The location of a field found by [`Record::find_field`].
///
/// `depth` counts inheritance steps from the most-derived type (`0`),
/// `index` is the declaration position inside that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSlot {
    pub depth: usize,
    pub index: usize,
}

// -----------------------------------------------------------------------------
// Record

/// A value-typed composite node.
///
/// A record holds the fields declared by its own runtime type and, if the
/// type derives from another one, a boxed `base` record holding the fields
/// declared by the ancestor. Field lookup walks this chain outward from the
/// most-derived type, so a derived field shadows a base field of the same name.
///
/// Cloning a record copies it entirely. Share a record through
/// [`ObjectRef`](crate::ObjectRef) to give it reference semantics.
///
/// # Examples
///
/// ```
/// use inspect_value::{Record, Value, Visibility};
///
/// let unit = Record::new("Soldier")
///     .with_private_field("rank", 2)
///     .with_base(Record::new("Unit").with_field("health", 100));
///
/// assert_eq!(unit.field("health"), Some(&Value::Int(100)));
/// assert_eq!(unit.field("rank"), Some(&Value::Int(2)));
///
/// let slot = unit.find_field("health").unwrap();
/// assert_eq!(slot.depth, 1);
/// assert_eq!(unit.declaring_type(slot), Some("Unit"));
/// assert_eq!(unit.slot(slot).unwrap().visibility(), Visibility::Public);
/// ```
#[derive(Clone, Default)]
pub struct Record {
    type_name: Cow<'static, str>,
    fields: Vec<Field>,
    field_indices: HashMap<Cow<'static, str>, usize>,
    base: Option<Box<Record>>,
}

impl Record {
    /// Creates a record of the given runtime type with no fields and no base.
    #[inline]
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            field_indices: HashMap::default(),
            base: None,
        }
    }

    /// Declares a field on this record's own type.
    ///
    /// If the field name already exists on this type, this will overwrite it.
    pub fn insert(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        visibility: Visibility,
        value: impl Into<Value>,
    ) {
        let name: Cow<'static, str> = name.into();
        let value = value.into();
        if let Some(&index) = self.field_indices.get(name.as_ref()) {
            let field = &mut self.fields[index];
            field.visibility = visibility;
            field.value = value;
        } else {
            self.field_indices.insert(name.clone(), self.fields.len());
            self.fields.push(Field {
                name,
                visibility,
                value,
            });
        }
    }

    #[inline]
    pub fn with_field(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.insert(name, Visibility::Public, value);
        self
    }

    #[inline]
    pub fn with_protected_field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(name, Visibility::Protected, value);
        self
    }

    #[inline]
    pub fn with_private_field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(name, Visibility::Private, value);
        self
    }

    /// Sets the record holding the fields of the ancestor type.
    #[inline]
    pub fn with_base(mut self, base: Record) -> Self {
        self.base = Some(Box::new(base));
        self
    }

    /// Returns the most-derived runtime type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn base(&self) -> Option<&Record> {
        self.base.as_deref()
    }

    /// Fields declared by this record's own type, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterates this record and its ancestors, most-derived first.
    pub fn layers(&self) -> impl Iterator<Item = &Record> {
        core::iter::successors(Some(self), |record| record.base())
    }

    fn layer_mut(&mut self, depth: usize) -> Option<&mut Record> {
        let mut layer = self;
        for _ in 0..depth {
            layer = layer.base.as_deref_mut()?;
        }
        Some(layer)
    }

    /// Finds a field by name, searching the most-derived type first and then
    /// each ancestor in order. Visibility does not affect the search.
    pub fn find_field(&self, name: &str) -> Option<FieldSlot> {
        self.layers().enumerate().find_map(|(depth, layer)| {
            layer
                .field_indices
                .get(name)
                .map(|&index| FieldSlot { depth, index })
        })
    }

    /// Returns the field at `slot`.
    pub fn slot(&self, slot: FieldSlot) -> Option<&Field> {
        self.layers().nth(slot.depth)?.fields.get(slot.index)
    }

    /// Returns the field at `slot` mutably.
    pub fn slot_mut(&mut self, slot: FieldSlot) -> Option<&mut Field> {
        self.layer_mut(slot.depth)?.fields.get_mut(slot.index)
    }

    /// Returns the name of the type that declares the field at `slot`.
    pub fn declaring_type(&self, slot: FieldSlot) -> Option<&str> {
        self.layers().nth(slot.depth).map(Record::type_name)
    }

    /// Returns the value of the named field, searching the inheritance chain.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        let slot = self.find_field(name)?;
        self.slot(slot).map(Field::value)
    }

    /// Returns the value of the named field mutably, searching the inheritance chain.
    #[inline]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        let slot = self.find_field(name)?;
        self.slot_mut(slot).map(Field::value_mut)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.fields == other.fields && self.base == other.base
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.type_name);
        for field in &self.fields {
            s.field(&field.name, &field.value);
        }
        if let Some(base) = &self.base {
            s.field("<base>", base);
        }
        s.finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        let mut first = true;
        for layer in self.layers() {
            for field in &layer.fields {
                if !first {
                    f.write_str(",")?;
                }
                first = false;
                write!(f, " {}: {}", field.name, field.value)?;
            }
        }
        if !first {
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}
