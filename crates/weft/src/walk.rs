//! Highlighting of every code block in a document tree.
//!
//! A code block is a `code` element whose parent is a `pre`, whose classes
//! name a language with `language-*` and whose only child is text. Each
//! block is highlighted on its own: a block that fails is logged and left
//! as it was, and the walk carries on with its siblings.

use tracing::{debug, warn};

use crate::block::CodeHighlighter;
use crate::document::{Element, Node};
use crate::language::extract_language;
use crate::meta::parse_meta;

const WALK_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::walk");

/// Callbacks around each highlighted code block.
pub trait BlockHooks {
    /// Called before a block is highlighted. Returning `false` leaves the
    /// block untouched.
    fn enter(&mut self, _code: &Element) -> bool {
        true
    }

    /// Called after a block's children have been replaced.
    fn leave(&mut self, _code: &Element) {}
}

/// Hooks that accept every block and observe nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl BlockHooks for NoHooks {}

/// Counts of what happened to the code blocks of a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    /// Blocks whose children were replaced.
    pub highlighted: usize,
    /// Blocks an `enter` hook declined.
    pub vetoed: usize,
    /// Blocks left untouched because highlighting failed.
    pub failed: usize,
}

/// Highlights every code block below `tree`.
pub fn transform<H>(tree: &mut Node, highlighter: &CodeHighlighter, hooks: &mut H) -> TransformReport
where
    H: BlockHooks + ?Sized,
{
    let mut walk = Walk {
        highlighter,
        hooks,
        report: TransformReport::default(),
    };
    walk.visit(tree, false);
    walk.report
}

struct Walk<'a, H: ?Sized> {
    highlighter: &'a CodeHighlighter,
    hooks: &'a mut H,
    report: TransformReport,
}

impl<H> Walk<'_, H>
where
    H: BlockHooks + ?Sized,
{
    fn visit(&mut self, node: &mut Node, in_pre: bool) {
        match node {
            Node::Root { children } => {
                for child in children {
                    self.visit(child, false);
                }
            }
            Node::Element(element) => {
                if in_pre && element.is("code") {
                    self.code_block(element);
                }
                let is_pre = element.is("pre");
                for child in &mut element.children {
                    self.visit(child, is_pre);
                }
            }
            Node::Text { .. } | Node::Comment { .. } => {}
        }
    }

    fn code_block(&mut self, code: &mut Element) {
        let Some(language) = extract_language(&code.properties.class_name) else {
            return;
        };
        let extra_query_dirs = code
            .meta()
            .map(|meta| self.highlighter.query_dirs_for_meta(&parse_meta(meta)))
            .unwrap_or_default();
        let [Node::Text { value: raw }] = code.children.as_slice() else {
            return;
        };

        if !self.hooks.enter(code) {
            debug!(target: WALK_TARGET, language, "code block vetoed by enter hook");
            self.report.vetoed += 1;
            return;
        }

        let nodes = match self
            .highlighter
            .compile_code_block(raw, language, &extra_query_dirs)
        {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!(
                    target: WALK_TARGET,
                    language,
                    error = %err,
                    "leaving code block unhighlighted"
                );
                self.report.failed += 1;
                return;
            }
        };

        code.children = nodes.into_iter().map(Node::from).collect();
        self.report.highlighted += 1;
        self.hooks.leave(code);
    }
}
