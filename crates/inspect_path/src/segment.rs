//! Provide single-step path resolution.

use alloc::borrow::Cow;
use core::fmt;

use inspect_value::{FieldAccessible, SlotError, Value, ValueKind};

use crate::AccessError;

// -----------------------------------------------------------------------------
// Segment

/// A **singular** step within a path.
///
/// # Rules
///
/// - Field: reads or writes the named field of a record or object, searching
///   the inheritance chain and ignoring visibility.
/// - Index: resolves the named field as above, then takes the element at the
///   given position of the sequence it holds.
///
/// # Examples
///
/// ```
/// use inspect_path::Segment;
/// use inspect_value::{ListRef, Record, Value};
///
/// let root = Value::Record(
///     Record::new("Squad")
///         .with_field("size", 3)
///         .with_field("members", ListRef::new(vec![Value::from("ada"), Value::from("bo")])),
/// );
///
/// let segment = Segment::Field("size".into());
/// assert_eq!(segment.read(&root), Ok(Value::Int(3)));
///
/// let segment = Segment::Index("members".into(), 1);
/// assert_eq!(segment.read(&root), Ok(Value::from("bo")));
/// assert_eq!(segment.to_string(), "members[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment<'a> {
    /// A named field access.
    ///
    /// Example: the `stats` of `weapons[0].stats`
    Field(Cow<'a, str>),
    /// A named field access followed by an element access.
    ///
    /// Example: the `weapons[0]` of `weapons[0].stats`
    Index(Cow<'a, str>, usize),
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(name, index) => write!(f, "{name}[{index}]"),
        }
    }
}

impl<'a> Segment<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Segment<'static> {
        match self {
            Self::Field(name) => Segment::Field(Cow::Owned(name.into_owned())),
            Self::Index(name, index) => Segment::Index(Cow::Owned(name.into_owned()), index),
        }
    }

    /// Returns the field name this step looks up.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(name) | Self::Index(name, _) => name,
        }
    }

    /// Resolves this step against `base` for reading.
    ///
    /// A field that no type in the chain declares reads as [`Value::Null`].
    /// An absent field is not iterable, so an index step over it fails.
    pub fn read(&self, base: &Value) -> Result<Value, SlotError> {
        match self {
            Self::Field(name) => Ok(base.field(name).unwrap_or_default()),
            Self::Index(name, index) => base.field(name).unwrap_or_default().element(*index),
        }
    }

    /// Resolves this step against `base` for writing: a missing field is an error.
    pub fn resolve(&self, base: &Value) -> Result<Value, SlotError> {
        let value = base
            .field(self.name())
            .ok_or(SlotError::MissingField(base.kind()))?;
        match self {
            Self::Field(_) => Ok(value),
            Self::Index(_, index) => value.element(*index),
        }
    }

    /// Checks that [`install`](Self::install) would succeed on `base`
    /// without touching it.
    pub fn probe(&self, base: &Value) -> Result<(), SlotError> {
        let value = base
            .field(self.name())
            .ok_or(SlotError::MissingField(base.kind()))?;
        let Self::Index(_, index) = *self else {
            return Ok(());
        };
        if let Value::Str(_) = value {
            return Err(SlotError::NotWritable(ValueKind::Str));
        }
        match value.element_count() {
            Some(len) if index < len => Ok(()),
            Some(len) => Err(SlotError::IndexOutOfRange { index, len }),
            None => Err(SlotError::NotIterable(value.kind())),
        }
    }

    /// Stores `value` into the slot this step names on `base`.
    ///
    /// For an index step the container is stored back into its field after
    /// the element is replaced, whether or not the container is shared.
    pub fn install(&self, base: &mut Value, value: Value) -> Result<(), SlotError> {
        match self {
            Self::Field(name) => base.set_field(name, value),
            Self::Index(name, index) => {
                let mut container = base
                    .field(name)
                    .ok_or(SlotError::MissingField(base.kind()))?;
                container.set_element(*index, value)?;
                base.set_field(name, container)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Single step with offset

/// A [`Segment`] combined with an `offset` for more helpful error reporting.
///
/// `offset` is the byte position of the step in its source path and is only
/// used to display error messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetSegment<'a> {
    pub segment: Segment<'a>,
    /// only used to display error messages
    pub offset: Option<usize>,
}

impl<'a> From<Segment<'a>> for OffsetSegment<'a> {
    #[inline]
    fn from(segment: Segment<'a>) -> Self {
        Self {
            segment,
            offset: None,
        }
    }
}

impl<'a> OffsetSegment<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetSegment<'static> {
        OffsetSegment {
            segment: self.segment.into_owned(),
            offset: self.offset,
        }
    }

    #[inline]
    fn error(&self, kind: SlotError) -> AccessError<'a> {
        AccessError::new(kind, self.segment.clone(), self.offset)
    }

    /// See [`Segment::read`].
    #[inline]
    pub fn read(&self, base: &Value) -> Result<Value, AccessError<'a>> {
        self.segment.read(base).map_err(|kind| self.error(kind))
    }

    /// See [`Segment::resolve`].
    #[inline]
    pub fn resolve(&self, base: &Value) -> Result<Value, AccessError<'a>> {
        self.segment.resolve(base).map_err(|kind| self.error(kind))
    }

    /// See [`Segment::probe`].
    #[inline]
    pub fn probe(&self, base: &Value) -> Result<(), AccessError<'a>> {
        self.segment.probe(base).map_err(|kind| self.error(kind))
    }

    /// See [`Segment::install`].
    #[inline]
    pub fn install(&self, base: &mut Value, value: Value) -> Result<(), AccessError<'a>> {
        self.segment
            .install(base, value)
            .map_err(|kind| self.error(kind))
    }
}
