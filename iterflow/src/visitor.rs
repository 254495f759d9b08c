//! Callback iteration on the caller's thread.

use crate::container::Container;

/// Calls `visit` once per item, in the container's traversal order.
pub fn for_each<C, F>(container: &C, mut visit: F)
where
    C: Container,
    F: FnMut(i64),
{
    container.traverse(|item| {
        visit(item);
        true
    });
}

/// Calls `visit` once per item until it returns `false`.
///
/// Returns true if every item was visited. Nothing runs in the background,
/// so stopping early needs no cleanup.
pub fn for_each_while<C, F>(container: &C, visit: F) -> bool
where
    C: Container,
    F: FnMut(i64) -> bool,
{
    container.traverse(visit)
}
