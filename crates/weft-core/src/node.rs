//! Nodes produced by the event replay compiler.

use serde::{Deserialize, Serialize};

/// A compiled node: a plain text leaf or an element wrapping one text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompiledNode {
    /// A bare text leaf.
    Text {
        /// Text content, verbatim from the source.
        value: String,
    },
    /// A `span` element wrapping a single text leaf.
    Span {
        /// Highlight classes, outer to inner. Empty for unhighlighted text.
        classes: Vec<String>,
        /// Text content, verbatim from the source.
        value: String,
    },
}

impl CompiledNode {
    /// Creates a bare text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Creates a span with at most one class.
    #[must_use]
    pub fn span(class: Option<&str>, value: impl Into<String>) -> Self {
        Self::Span {
            classes: class.map(str::to_owned).into_iter().collect(),
            value: value.into(),
        }
    }

    /// Returns the text carried by this node.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Text { value } | Self::Span { value, .. } => value,
        }
    }

    /// Returns the classes attached to this node, outer to inner.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        match self {
            Self::Text { .. } => &[],
            Self::Span { classes, .. } => classes,
        }
    }

    /// Returns the innermost class attached to this node, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.classes().last().map(String::as_str)
    }
}

/// Concatenates the text of every node in order.
///
/// For the output of a successful compile this reproduces the compiled
/// source exactly.
#[must_use]
pub fn concatenate(nodes: &[CompiledNode]) -> String {
    nodes.iter().map(CompiledNode::value).collect()
}
