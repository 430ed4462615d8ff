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

mod accessor;
mod assign;
mod error;
mod hierarchy;
mod parser;
mod path_access;
mod property;
mod segment;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use accessor::PathAccessor;
pub use assign::AssignMode;
pub use error::{AccessError, PathAccessError};
pub use parser::{AccessPath, ParseError};
pub use path_access::{PathAccess, assign_value, assign_value_with, resolve_value, tokenize};
pub use property::Property;
pub use segment::{OffsetSegment, Segment};
