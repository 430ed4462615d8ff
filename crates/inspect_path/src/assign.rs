//! Provide multi-target writes.

use inspect_value::Value;

use crate::hierarchy::Hierarchy;
use crate::{AccessError, OffsetSegment, PathAccessError};

/// How a write to several roots reacts to a root that cannot be resolved.
///
/// Every root receives the same path and the same value. The modes differ only
/// in what has already been written when a root fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssignMode {
    /// Check every root first and write only if all of them resolve.
    /// A failure leaves every root untouched.
    #[default]
    ValidateFirst,
    /// Capture and write one root at a time, stopping at the first failure.
    /// Roots before the failing one keep the new value; there is no rollback.
    Sequential,
}

/// Writes `value` at `segments` into every root.
///
/// Errors are reported as [`PathAccessError::TargetError`] with the position
/// of the failing root.
pub(crate) fn assign_all<'a>(
    roots: &mut [Value],
    segments: &[OffsetSegment<'a>],
    value: Value,
    mode: AssignMode,
) -> Result<(), PathAccessError<'a>> {
    log::debug!(
        "assigning a {} value to {} target(s) ({mode:?})",
        value.kind(),
        roots.len(),
    );

    match mode {
        AssignMode::ValidateFirst => {
            for (target, root) in roots.iter().enumerate() {
                Hierarchy::capture(root, segments).map_err(target_error(target))?;
            }
            // Roots may share nodes, so each one is captured only after the
            // roots before it have been written.
            for (target, root) in roots.iter_mut().enumerate() {
                write_one(root, segments, value.clone()).map_err(target_error(target))?;
            }
        }
        AssignMode::Sequential => {
            for (target, root) in roots.iter_mut().enumerate() {
                if let Err(error) = write_one(root, segments, value.clone()) {
                    if target > 0 {
                        log::warn!(
                            "write aborted at target {target}: {target} earlier target(s) keep the new value"
                        );
                    }
                    return Err(target_error(target)(error));
                }
            }
        }
    }
    Ok(())
}

#[inline]
fn write_one<'a>(
    root: &mut Value,
    segments: &[OffsetSegment<'a>],
    value: Value,
) -> Result<(), AccessError<'a>> {
    Hierarchy::capture(root, segments)?.rewrite(root, segments, value)
}

#[inline]
fn target_error<'a>(target: usize) -> impl FnOnce(AccessError<'a>) -> PathAccessError<'a> {
    move |error| PathAccessError::TargetError { target, error }
}
