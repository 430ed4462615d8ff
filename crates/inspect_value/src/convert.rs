//! Conversions between host types and [`Value`].

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::{ListRef, ObjectRef, Record, Value, ValueKind};

// -----------------------------------------------------------------------------
// Error

/// Returned when a [`Value`] does not hold the requested host type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a {expected} value, found a {found} value")]
pub struct ValueCastError {
    pub expected: ValueKind,
    pub found: ValueKind,
}

// -----------------------------------------------------------------------------
// Into Value

macro_rules! impl_from_host {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_host!(Bool: bool);
impl_from_host!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from_host!(Float: f32, f64);
impl_from_host!(Char: char);
impl_from_host!(Str: String, &str);
impl_from_host!(Record: Record);
impl_from_host!(Array: Vec<Value>);
impl_from_host!(Object: ObjectRef);
impl_from_host!(List: ListRef);

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// From Value

macro_rules! impl_try_from_value {
    ($variant:ident => $ty:ty) => {
        impl TryFrom<Value> for $ty {
            type Error = ValueCastError;

            #[inline]
            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(ValueCastError {
                        expected: ValueKind::$variant,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_try_from_value!(Bool => bool);
impl_try_from_value!(Int => i64);
impl_try_from_value!(Char => char);
impl_try_from_value!(Str => String);
impl_try_from_value!(Record => Record);
impl_try_from_value!(Array => Vec<Value>);
impl_try_from_value!(Object => ObjectRef);
impl_try_from_value!(List => ListRef);

impl TryFrom<Value> for i32 {
    type Error = ValueCastError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let found = value.kind();
        i64::try_from(value)
            .ok()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or(ValueCastError {
                expected: ValueKind::Int,
                found,
            })
    }
}

/// Integers widen to floats; the reverse is never implicit.
impl TryFrom<Value> for f64 {
    type Error = ValueCastError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(ValueCastError {
                expected: ValueKind::Float,
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = ValueCastError;

    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|v| v as f32)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::ValueCastError;
    use crate::{Value, ValueKind};

    #[test]
    fn host_round_trip() {
        assert_eq!(i64::try_from(Value::from(7_u8)), Ok(7));
        assert_eq!(String::try_from(Value::from("hi")).as_deref(), Ok("hi"));
        assert_eq!(f64::try_from(Value::from(2)), Ok(2.0));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn mismatched_cast() {
        assert_eq!(
            bool::try_from(Value::Int(1)),
            Err(ValueCastError {
                expected: ValueKind::Bool,
                found: ValueKind::Int,
            })
        );
        assert!(i32::try_from(Value::Int(i64::MAX)).is_err());
    }
}
