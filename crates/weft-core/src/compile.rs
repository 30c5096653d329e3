//! Replay of highlight events into compiled nodes.
//!
//! The compiler walks the event stream once, keeping an open-tag stack.
//! Each non-empty source span becomes exactly one `span` node whose class
//! is derived from the tags visible at that point.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolViolation;
use crate::event::{HighlightEvent, StackEntry};
use crate::node::CompiledNode;
use crate::resolve::resolve_visible;

/// How the visible tags at a source span become classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassMode {
    /// Render only the innermost visible tag.
    #[default]
    Innermost,
    /// Render every visible tag, outer to inner.
    Nested,
}

impl ClassMode {
    fn classes(self, visible: &[&str]) -> Vec<String> {
        match self {
            Self::Innermost => visible
                .last()
                .map(|tag| (*tag).to_owned())
                .into_iter()
                .collect(),
            Self::Nested => visible.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }
}

/// Renames highlight names to the classes rendered for them.
///
/// Names without an entry render as themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightMapping(BTreeMap<String, String>);

impl HighlightMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Maps `highlight` to `class`, returning any previous class.
    pub fn insert(
        &mut self,
        highlight: impl Into<String>,
        class: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(highlight.into(), class.into())
    }

    /// Returns the class rendered for `highlight`.
    #[must_use]
    pub fn class_for<'a>(&'a self, highlight: &'a str) -> &'a str {
        self.0.get(highlight).map_or(highlight, String::as_str)
    }

    /// Returns whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HighlightMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(highlight, class)| (highlight.into(), class.into()))
                .collect(),
        )
    }
}

/// Options controlling event replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// How visible tags become classes.
    pub class_mode: ClassMode,
    /// Renames applied to highlight names as scopes open.
    pub mapping: HighlightMapping,
}

impl CompileOptions {
    fn entry_for(&self, highlight: &str) -> StackEntry {
        match StackEntry::from_highlight(highlight) {
            StackEntry::Tag(_) => StackEntry::Tag(self.mapping.class_for(highlight).to_owned()),
            StackEntry::Reset => StackEntry::Reset,
        }
    }
}

/// Compiles `events` over `source` with default options.
///
/// # Errors
///
/// Returns a [`ProtocolViolation`] if the stream is not well-nested or does
/// not cover `source` exactly once.
pub fn compile(
    events: &[HighlightEvent],
    source: &str,
) -> Result<Vec<CompiledNode>, ProtocolViolation> {
    compile_with(events, source, &CompileOptions::default())
}

/// Compiles `events` over `source`.
///
/// Every non-empty `Source` event becomes one [`CompiledNode::Span`] whose
/// text is the byte-exact slice of `source`. Spans with no visible tag carry
/// no class.
///
/// # Errors
///
/// Returns a [`ProtocolViolation`] if an `End` has no matching `Start`, a
/// scope is left open, a range is out of order, out of bounds or splits a
/// character, or the ranges do not reach the end of `source`.
pub fn compile_with(
    events: &[HighlightEvent],
    source: &str,
    options: &CompileOptions,
) -> Result<Vec<CompiledNode>, ProtocolViolation> {
    let mut replay = Replay::new(source, options);
    for (index, event) in events.iter().enumerate() {
        replay.apply(index, event)?;
    }
    replay.finish()
}

struct Replay<'a> {
    source: &'a str,
    options: &'a CompileOptions,
    stack: Vec<StackEntry>,
    nodes: Vec<CompiledNode>,
    cursor: usize,
}

impl<'a> Replay<'a> {
    const fn new(source: &'a str, options: &'a CompileOptions) -> Self {
        Self {
            source,
            options,
            stack: Vec::new(),
            nodes: Vec::new(),
            cursor: 0,
        }
    }

    fn apply(&mut self, index: usize, event: &HighlightEvent) -> Result<(), ProtocolViolation> {
        match event {
            HighlightEvent::Start { highlight } => {
                self.stack.push(self.options.entry_for(highlight));
            }
            HighlightEvent::End => {
                self.stack
                    .pop()
                    .ok_or(ProtocolViolation::UnbalancedEnd { index })?;
            }
            HighlightEvent::Source { range } => self.emit(index, range)?,
        }
        Ok(())
    }

    fn emit(&mut self, index: usize, range: &Range<usize>) -> Result<(), ProtocolViolation> {
        if range.start != self.cursor {
            return Err(ProtocolViolation::Discontiguous {
                index,
                expected: self.cursor,
                found: range.start,
            });
        }

        let text = self
            .source
            .get(range.clone())
            .ok_or(ProtocolViolation::InvalidRange {
                index,
                start: range.start,
                end: range.end,
                len: self.source.len(),
            })?;
        self.cursor = range.end;

        if text.is_empty() {
            return Ok(());
        }

        let classes = self.options.class_mode.classes(&resolve_visible(&self.stack));
        self.nodes.push(CompiledNode::Span {
            classes,
            value: text.to_owned(),
        });
        Ok(())
    }

    fn finish(self) -> Result<Vec<CompiledNode>, ProtocolViolation> {
        if !self.stack.is_empty() {
            return Err(ProtocolViolation::UnclosedScopes {
                open: self.stack.len(),
            });
        }
        if self.cursor != self.source.len() {
            return Err(ProtocolViolation::IncompleteCoverage {
                covered: self.cursor,
                len: self.source.len(),
            });
        }
        Ok(self.nodes)
    }
}
