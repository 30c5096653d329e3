//! Resolution of the highlight tags visible on the open-tag stack.

use crate::event::StackEntry;

/// Returns the tags visible on `stack`, outer to inner.
///
/// Only entries above the most recent [`StackEntry::Reset`] are visible.
/// A tag that appears more than once is reported once, at its outermost
/// position.
///
/// # Examples
///
/// ```
/// use weft_core::{StackEntry, resolve_visible};
///
/// let stack = [
///     StackEntry::Tag("markup".into()),
///     StackEntry::Reset,
///     StackEntry::Tag("keyword".into()),
/// ];
/// assert_eq!(resolve_visible(&stack), vec!["keyword"]);
/// ```
#[must_use]
pub fn resolve_visible(stack: &[StackEntry]) -> Vec<&str> {
    let visible_from = stack
        .iter()
        .rposition(|entry| *entry == StackEntry::Reset)
        .map_or(0, |reset| reset + 1);

    let mut visible: Vec<&str> = Vec::new();
    for tag in stack
        .iter()
        .skip(visible_from)
        .filter_map(StackEntry::as_tag)
    {
        if !visible.contains(&tag) {
            visible.push(tag);
        }
    }
    visible
}
