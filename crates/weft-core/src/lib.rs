//! Event-to-tree compilation for syntax-highlighted code blocks.
//!
//! This crate turns the flat highlight event stream emitted by a grammar
//! based classifier into a sequence of text and `span` nodes ready to be
//! spliced into a document tree. It provides:
//!
//! - **Indentation normalization** via [`normalize`], which removes block
//!   indentation and boundary blank lines from extracted code text
//! - **Stack resolution** via [`resolve_visible`], which computes the
//!   highlight tags visible since the most recent reset marker
//! - **Event replay** via [`compile`] and [`compile_with`], which emit one
//!   node per source span
//! - **Trimming** via [`trim_trailing_newline`], which removes the single
//!   trailing newline node left behind by normalization
//!
//! # Example
//!
//! ```
//! use weft_core::{CompiledNode, HighlightEvent, compile, normalize, trim_trailing_newline};
//!
//! let source = normalize("\n    function f() {}\n");
//! assert_eq!(source.text(), "function f() {}\n");
//!
//! let events = [
//!     HighlightEvent::start("keyword"),
//!     HighlightEvent::source(0, 8),
//!     HighlightEvent::End,
//!     HighlightEvent::source(8, 15),
//!     HighlightEvent::source(15, 16),
//! ];
//! let nodes = trim_trailing_newline(compile(&events, source.text())?);
//!
//! assert_eq!(
//!     nodes,
//!     vec![
//!         CompiledNode::span(Some("keyword"), "function"),
//!         CompiledNode::span(None, " f() {}"),
//!     ]
//! );
//! # Ok::<(), weft_core::ProtocolViolation>(())
//! ```

mod compile;
mod error;
mod event;
mod node;
mod normalize;
mod resolve;
mod trim;

pub use compile::{ClassMode, CompileOptions, HighlightMapping, compile, compile_with};
pub use error::ProtocolViolation;
pub use event::{HighlightEvent, RESET_HIGHLIGHT, StackEntry};
pub use node::{CompiledNode, concatenate};
pub use normalize::{NormalizedSource, normalize};
pub use resolve::resolve_visible;
pub use trim::trim_trailing_newline;

#[cfg(test)]
mod tests;
