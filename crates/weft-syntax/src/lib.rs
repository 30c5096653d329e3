//! Tree-sitter powered classification of code into highlight events.
//!
//! This crate turns source text into the balanced, fully covering
//! [`weft_core::HighlightEvent`] stream that `weft-core` compiles into
//! highlighted nodes. It provides:
//!
//! - **Grammar registry** via [`SupportedLanguage`], the statically linked
//!   grammars and their bundled queries
//! - **Query loading** via [`load_query_text`], which layers query
//!   directories over the bundled queries with `;; extends` merging
//! - **Classification** via [`Highlighter`], which runs highlight and
//!   injection queries and sweeps the captured regions into events
//! - **Reuse policy** via [`HighlighterPolicy`], which shares or caches
//!   highlighters depending on call-scoped query directories
//!
//! # Supported Languages
//!
//! - Rust (`rust`, `rs`)
//! - Python (`python`, `py`)
//! - TypeScript (`typescript`, `ts`, `tsx`)
//!
//! # Example
//!
//! ```
//! use weft_syntax::{Classifier, HighlighterPolicy, HighlighterSources};
//!
//! let policy = HighlighterPolicy::new(HighlighterSources::new(), 0);
//! let highlighter = policy.highlighter_for(&[]);
//!
//! let events = highlighter.classify("fn main() {}\n", "rust")?;
//! assert!(!events.is_empty());
//! # Ok::<(), weft_syntax::ClassifyError>(())
//! ```

mod captures;
mod error;
mod highlighter;
mod language;
mod lifecycle;
mod queries;
mod sweep;

pub use error::ClassifyError;
pub use highlighter::{Classifier, Highlighter, HighlighterSources, MAX_INJECTION_DEPTH};
pub use language::{LanguageParseError, SupportedLanguage};
pub use lifecycle::HighlighterPolicy;
pub use queries::{QueryKind, load_query_text};
