//! Syntax highlighting for code blocks in hast-shaped document trees.
//!
//! `weft` finds `pre > code.language-*` blocks in a [`Node`] tree, classifies
//! their text with Tree-sitter through `weft-syntax`, compiles the resulting
//! highlight events with `weft-core`, and splices `span` nodes carrying
//! highlight classes back in place of the block's text.
//!
//! - [`CodeHighlighter`] holds the configured highlighter, compile options
//!   and query aliases, and compiles single blocks
//! - [`transform`] walks a tree, consulting [`BlockHooks`] around each block
//! - [`to_html`] renders the tree
//! - [`telemetry::initialise`] installs a `tracing` subscriber for hosts
//!   without one
//!
//! # Example
//!
//! ```
//! use weft::{CodeHighlighter, Element, NoHooks, Node, to_html, transform};
//! use weft_config::Config;
//!
//! let highlighter = CodeHighlighter::new(&Config::default());
//! let code = Element::new("code")
//!     .with_classes(["language-rust"])
//!     .with_children(vec![Node::text("let x = 1;\n")]);
//! let mut tree = Node::root(vec![Element::new("pre").with_children(vec![code.into()]).into()]);
//!
//! let report = transform(&mut tree, &highlighter, &mut NoHooks);
//!
//! assert_eq!(report.highlighted, 1);
//! assert!(to_html(&tree).contains("<span class=\"keyword\">let</span>"));
//! ```

mod block;
mod document;
mod error;
mod language;
mod meta;
mod render;
pub mod telemetry;
mod walk;

pub use block::{CodeHighlighter, QUERY_META_KEY, compile_code_block};
pub use document::{Element, ElementData, Node, Properties};
pub use error::BlockError;
pub use language::extract_language;
pub use meta::{MetaValue, parse_meta};
pub use render::to_html;
pub use walk::{BlockHooks, NoHooks, TransformReport, transform};

#[cfg(test)]
mod tests;
