//! Conversion of overlapping highlight regions into a nested event stream.
//!
//! Query captures can overlap arbitrarily. The sweep orders them so that
//! enclosing regions open first, clamps each region to the one enclosing
//! it, and fills the gaps with plain source spans. The result is balanced
//! and covers the text exactly once.

use std::cmp::Reverse;
use std::ops::Range;

use weft_core::HighlightEvent;

/// A highlight scope over a byte range of the classified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) range: Range<usize>,
    pub(crate) highlight: String,
    /// Injection nesting depth; host captures are at depth zero.
    pub(crate) depth: usize,
    /// Pattern that produced the capture.
    pub(crate) pattern_index: usize,
}

impl Region {
    fn sort_key(&self) -> (usize, Reverse<usize>, usize, usize) {
        (
            self.range.start,
            Reverse(self.range.end),
            self.depth,
            self.pattern_index,
        )
    }
}

/// Replays `regions` into events covering `0..len`.
///
/// Regions are clamped to `0..body_end`; the bytes from `body_end` to `len`
/// (the final line terminator) are always emitted as their own plain span.
pub(crate) fn sweep(mut regions: Vec<Region>, body_end: usize, len: usize) -> Vec<HighlightEvent> {
    regions.sort_by_key(Region::sort_key);

    let mut state = Sweep::default();
    for region in regions {
        let start = region.range.start.min(body_end);
        state.close_until(start);

        let end = state
            .open
            .last()
            .map_or(region.range.end, |enclosing| region.range.end.min(*enclosing))
            .min(body_end);
        if start >= end {
            continue;
        }

        state.advance(start);
        state.events.push(HighlightEvent::start(region.highlight));
        state.open.push(end);
    }

    state.close_until(usize::MAX);
    state.advance(body_end);
    state.advance(len);
    state.events
}

#[derive(Default)]
struct Sweep {
    events: Vec<HighlightEvent>,
    /// End offsets of the open regions, innermost last.
    open: Vec<usize>,
    cursor: usize,
}

impl Sweep {
    /// Emits a plain span up to `target` if the cursor is behind it.
    fn advance(&mut self, target: usize) {
        if self.cursor < target {
            self.events.push(HighlightEvent::source(self.cursor, target));
            self.cursor = target;
        }
    }

    /// Closes every open region ending at or before `offset`.
    fn close_until(&mut self, offset: usize) {
        while let Some(end) = self.open.last().copied() {
            if end > offset {
                break;
            }
            self.advance(end);
            self.events.push(HighlightEvent::End);
            self.open.pop();
        }
    }
}
