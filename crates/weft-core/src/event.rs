//! Highlight events and the open-tag stack they drive.
//!
//! A classifier describes highlighted text as a flat, well-nested stream of
//! [`HighlightEvent`] values. Replaying the stream pushes and pops
//! [`StackEntry`] values; the special `none` highlight pushes a reset
//! marker instead of a tag.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Highlight name that acts as a reset marker on the open-tag stack.
pub const RESET_HIGHLIGHT: &str = "none";

/// A single event in a classifier's highlight stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HighlightEvent {
    /// Opens a named highlight scope.
    Start {
        /// Name of the highlight capture, such as `keyword` or `string`.
        highlight: String,
    },
    /// A half-open byte range of the source text.
    Source {
        /// Byte range `[start, end)` into the classified text.
        range: Range<usize>,
    },
    /// Closes the innermost open scope.
    End,
}

impl HighlightEvent {
    /// Creates a [`HighlightEvent::Start`] event.
    #[must_use]
    pub fn start(highlight: impl Into<String>) -> Self {
        Self::Start {
            highlight: highlight.into(),
        }
    }

    /// Creates a [`HighlightEvent::Source`] event covering `start..end`.
    #[must_use]
    pub const fn source(start: usize, end: usize) -> Self {
        Self::Source { range: start..end }
    }
}

/// An entry on the open-tag stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StackEntry {
    /// A visible highlight tag.
    Tag(String),
    /// Hides every entry pushed before it from the resolver.
    Reset,
}

impl StackEntry {
    /// Builds the stack entry for a highlight name.
    ///
    /// The name [`RESET_HIGHLIGHT`] produces [`StackEntry::Reset`]; every
    /// other name produces a tag.
    #[must_use]
    pub fn from_highlight(highlight: &str) -> Self {
        if highlight == RESET_HIGHLIGHT {
            Self::Reset
        } else {
            Self::Tag(highlight.to_owned())
        }
    }

    /// Returns the tag name, or `None` for a reset marker.
    #[must_use]
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Reset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_highlight_becomes_reset() {
        assert_eq!(StackEntry::from_highlight("none"), StackEntry::Reset);
        assert_eq!(StackEntry::Reset.as_tag(), None);
    }

    #[test]
    fn other_highlights_become_tags() {
        let entry = StackEntry::from_highlight("none.special");
        assert_eq!(entry.as_tag(), Some("none.special"));
    }

    #[test]
    fn events_serialise_with_a_type_tag() {
        let json = serde_json::to_string(&[
            HighlightEvent::start("keyword"),
            HighlightEvent::source(0, 2),
            HighlightEvent::End,
        ])
        .expect("serialise events");

        assert_eq!(
            json,
            r#"[{"type":"start","highlight":"keyword"},{"type":"source","range":{"start":0,"end":2}},{"type":"end"}]"#
        );
    }
}
