//! Provide [`Property`], one path bound to a set of edited objects.

use alloc::vec::Vec;

use inspect_value::{ObjectRef, Value, ValueCastError};

use crate::{AccessError, AssignMode, ParseError, PathAccessError, PathAccessor};

/// A path bound to one or more target objects.
///
/// Reads come from the first target. Writes go to every target, each with
/// its own bottom-up rewrite.
///
/// # Examples
///
/// ```
/// use inspect_path::Property;
/// use inspect_value::{ObjectRef, Record, Value};
///
/// let unit = || {
///     let position = Record::new("Vec2").with_field("x", 0.0).with_field("y", 0.0);
///     ObjectRef::new(Record::new("Unit").with_field("position", position))
/// };
/// let (a, b) = (unit(), unit());
///
/// let position = Property::parse(vec![a.clone(), b.clone()], "position").unwrap();
/// let x = position.relative("x").unwrap();
/// x.set_value(3.0).unwrap();
///
/// assert_eq!(x.path().to_string(), "position.x");
/// assert_eq!(x.value_as::<f64>().unwrap(), 3.0);
/// let position = b.borrow().field("position").cloned();
/// assert_eq!(position, Some(Value::Record(Record::new("Vec2").with_field("x", 3.0).with_field("y", 0.0))));
/// ```
#[derive(Debug, Clone)]
pub struct Property {
    targets: Vec<ObjectRef>,
    path: PathAccessor,
    mode: AssignMode,
}

impl Property {
    /// Creates a property over `targets` with the default [`AssignMode`].
    #[inline]
    pub fn new(targets: Vec<ObjectRef>, path: PathAccessor) -> Self {
        Self {
            targets,
            path,
            mode: AssignMode::default(),
        }
    }

    /// Parses `path` and creates a property over `targets`.
    #[inline]
    pub fn parse<'a>(targets: Vec<ObjectRef>, path: &'a str) -> Result<Self, ParseError<'a>> {
        Ok(Self::new(targets, PathAccessor::parse(path)?))
    }

    /// Sets how [`set_value`](Self::set_value) treats a failing target.
    #[inline]
    pub fn with_mode(mut self, mode: AssignMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn targets(&self) -> &[ObjectRef] {
        &self.targets
    }

    #[inline]
    pub fn path(&self) -> &PathAccessor {
        &self.path
    }

    #[inline]
    pub fn mode(&self) -> AssignMode {
        self.mode
    }

    /// Reads the value from the first target.
    ///
    /// A property without targets reads as [`Value::Null`].
    pub fn value(&self) -> Result<Value, AccessError<'static>> {
        match self.targets.first() {
            Some(target) => self.path.resolve(&Value::Object(target.clone())),
            None => Ok(Value::Null),
        }
    }

    /// Reads the value from the first target, converted to `T`.
    pub fn value_as<T>(&self) -> Result<T, PathAccessError<'static>>
    where
        T: TryFrom<Value, Error = ValueCastError>,
    {
        Ok(T::try_from(self.value()?)?)
    }

    /// Writes `value` to every target.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<(), PathAccessError<'static>> {
        let mut roots: Vec<Value> = self.targets.iter().cloned().map(Value::Object).collect();
        self.path.assign_all(&mut roots, value.into(), self.mode)?;
        log::debug!("set `{}` on {} target(s)", self.path, roots.len());
        Ok(())
    }

    /// Returns the property at `sub_path` below this one, over the same targets.
    pub fn relative<'a>(&self, sub_path: &'a str) -> Result<Property, ParseError<'a>> {
        let sub = PathAccessor::parse(sub_path)?;
        Ok(Self {
            targets: self.targets.clone(),
            path: self.path.clone().concat(sub),
            mode: self.mode,
        })
    }
}
