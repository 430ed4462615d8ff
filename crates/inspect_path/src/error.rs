use core::fmt;

use inspect_value::{SlotError, ValueCastError};

use crate::{ParseError, Segment};

// -----------------------------------------------------------------------------
// AccessError

/// An error originating from a [`Segment`] of a path.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError<'a> {
    kind: SlotError,
    segment: Segment<'a>,
    offset: Option<usize>,
}

impl<'a> AccessError<'a> {
    #[inline]
    pub(crate) fn new(kind: SlotError, segment: Segment<'a>, offset: Option<usize>) -> Self {
        Self {
            kind,
            segment,
            offset,
        }
    }

    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &SlotError {
        &self.kind
    }

    /// Returns the [`Segment`] that this [`AccessError`] occurred in.
    #[inline]
    pub fn segment(&self) -> &Segment<'a> {
        &self.segment
    }

    /// If the [`Segment`] was created with a parser, returns its offset in the path string.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl fmt::Display for AccessError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error accessing `{}`", self.segment)?;
        if let Some(offset) = self.offset {
            write!(f, " (offset {offset})")?;
        }
        match self.kind {
            SlotError::MissingField(kind) => write!(
                f,
                ": the {kind} accessed doesn't have field `{}`",
                self.segment.name()
            ),
            kind => write!(f, ": {kind}"),
        }
    }
}

impl core::error::Error for AccessError<'_> {}

// -----------------------------------------------------------------------------
// PathAccessError

/// An error returned from a failed path read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathAccessError<'a> {
    /// A path string that could not be parsed.
    /// See [`ParseError`] for details.
    ParseError(ParseError<'a>),
    /// Resolution failed after parsing.
    /// See [`AccessError`] for details.
    AccessError(AccessError<'a>),
    /// Resolution failed on one root of a multi-target write.
    TargetError {
        target: usize,
        error: AccessError<'a>,
    },
    /// The resolved value does not hold the requested host type.
    InvalidDowncast(ValueCastError),
}

impl fmt::Display for PathAccessError<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(err) => fmt::Display::fmt(err, f),
            Self::AccessError(err) => fmt::Display::fmt(err, f),
            Self::TargetError { target, error } => write!(f, "target {target}: {error}"),
            Self::InvalidDowncast(err) => {
                write!(f, "Can't convert the result of access: {err}")
            }
        }
    }
}

impl core::error::Error for PathAccessError<'_> {}

macro_rules! impl_from_error {
    ($lt:lifetime; $($source:ty => $variant:ident),* $(,)?) => {$(
        impl<$lt> From<$source> for PathAccessError<$lt> {
            #[inline]
            fn from(error: $source) -> Self {
                Self::$variant(error)
            }
        }
    )*};
}

impl_from_error! {
    'a;
    ParseError<'a> => ParseError,
    AccessError<'a> => AccessError,
    ValueCastError => InvalidDowncast,
}

impl PathAccessError<'_> {
    /// Returns the underlying [`AccessError`], if resolution failed.
    pub fn access_error(&self) -> Option<&AccessError<'_>> {
        match self {
            Self::AccessError(error) | Self::TargetError { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the failing [`SlotError`], if resolution failed.
    #[inline]
    pub fn slot_error(&self) -> Option<&SlotError> {
        self.access_error().map(|error| error.kind())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use inspect_value::{SlotError, ValueKind};

    use super::AccessError;
    use crate::{PathAccessError, Segment};

    #[test]
    fn display_mentions_segment_and_offset() {
        let error = AccessError::new(
            SlotError::MissingField(ValueKind::Record),
            Segment::Field("hp".into()),
            Some(6),
        );
        assert_eq!(
            error.to_string(),
            "Error accessing `hp` (offset 6): the record accessed doesn't have field `hp`"
        );

        let error = AccessError::new(
            SlotError::IndexOutOfRange { index: 5, len: 3 },
            Segment::Index("items".into(), 5),
            None,
        );
        assert_eq!(
            error.to_string(),
            "Error accessing `items[5]`: index 5 is out of range for a sequence of 3 elements"
        );
    }

    #[test]
    fn target_error_exposes_slot() {
        let error = PathAccessError::TargetError {
            target: 1,
            error: AccessError::new(
                SlotError::NotIterable(ValueKind::Int),
                Segment::Index("n".into(), 0),
                Some(0),
            ),
        };
        assert_eq!(
            error.slot_error(),
            Some(&SlotError::NotIterable(ValueKind::Int))
        );
        assert!(error.to_string().starts_with("target 1: "));
    }
}
