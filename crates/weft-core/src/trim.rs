//! Removal of the trailing newline node left by normalization.

use crate::node::CompiledNode;

/// Drops the last node when its entire text is a single `\n`.
///
/// Both bare text leaves and spans are considered. Nothing else is trimmed:
/// leading whitespace, blank lines inside the block and longer trailing
/// newline runs are kept.
#[must_use]
pub fn trim_trailing_newline(mut nodes: Vec<CompiledNode>) -> Vec<CompiledNode> {
    if nodes.last().is_some_and(|node| node.value() == "\n") {
        nodes.pop();
    }
    nodes
}
