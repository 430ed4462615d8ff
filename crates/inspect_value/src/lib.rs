#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod access;
mod convert;
mod handle;
mod record;
mod value;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use access::{FieldAccessible, SlotError};
pub use convert::ValueCastError;
pub use handle::{ListRef, ObjectRef};
pub use record::{Field, FieldSlot, Record, Visibility};
pub use value::{Value, ValueKind};
