//! Compilation of a single code block.
//!
//! [`CodeHighlighter`] holds everything a block needs from configuration:
//! the highlighter reuse policy, the compile options and the query aliases
//! that `query=<alias>` meta tokens resolve through.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use tracing::{debug, warn};
use weft_config::Config;
use weft_core::{CompileOptions, CompiledNode, compile_with, normalize, trim_trailing_newline};
use weft_syntax::{Classifier, HighlighterPolicy, HighlighterSources, SupportedLanguage};

use crate::error::BlockError;
use crate::meta::MetaValue;

const BLOCK_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::block");

/// Meta key naming a query alias for one block.
pub const QUERY_META_KEY: &str = "query";

/// Highlights code blocks according to a [`Config`].
#[derive(Debug)]
pub struct CodeHighlighter {
    policy: HighlighterPolicy,
    options: CompileOptions,
    query_aliases: BTreeMap<String, Utf8PathBuf>,
}

impl CodeHighlighter {
    /// Builds the shared highlighter described by `config`.
    ///
    /// Language names that match no grammar are skipped with a warning.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let sources = HighlighterSources {
            languages: selected_languages(&config.languages),
            query_dirs: config.query_dirs.clone(),
        };
        Self {
            policy: HighlighterPolicy::new(sources, config.cache_capacity),
            options: config.compile_options(),
            query_aliases: config.query_aliases.clone(),
        }
    }

    /// Returns the highlighter reuse policy.
    #[must_use]
    pub const fn policy(&self) -> &HighlighterPolicy {
        &self.policy
    }

    /// Returns the options applied when replaying events.
    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Highlights `raw` code as `language`.
    ///
    /// `extra_query_dirs` are applied after the configured query
    /// directories for this call only.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Classification`] if the code cannot be
    /// classified and [`BlockError::Protocol`] if the classifier's events
    /// are malformed.
    pub fn compile_code_block(
        &self,
        raw: &str,
        language: &str,
        extra_query_dirs: &[Utf8PathBuf],
    ) -> Result<Vec<CompiledNode>, BlockError> {
        let highlighter = self.policy.highlighter_for(extra_query_dirs);
        compile_code_block(highlighter.as_ref(), raw, language, &self.options)
    }

    /// Returns the call-scoped query directories requested by a block's
    /// meta.
    ///
    /// An alias with no configured directory is skipped with a warning.
    #[must_use]
    pub fn query_dirs_for_meta(&self, meta: &BTreeMap<String, MetaValue>) -> Vec<Utf8PathBuf> {
        let Some(alias) = meta.get(QUERY_META_KEY).and_then(MetaValue::as_text) else {
            return Vec::new();
        };
        match self.query_aliases.get(alias) {
            Some(dir) => vec![dir.clone()],
            None => {
                warn!(
                    target: BLOCK_TARGET,
                    alias,
                    "ignoring unresolved query alias"
                );
                Vec::new()
            }
        }
    }
}

/// Normalizes, classifies, compiles and trims one code block.
///
/// # Errors
///
/// Returns [`BlockError::Classification`] if `classifier` fails and
/// [`BlockError::Protocol`] if its events cannot be replayed over the
/// normalized text.
pub fn compile_code_block<C>(
    classifier: &C,
    raw: &str,
    language: &str,
    options: &CompileOptions,
) -> Result<Vec<CompiledNode>, BlockError>
where
    C: Classifier + ?Sized,
{
    let source = normalize(raw);
    let events = classifier.classify(source.text(), language)?;
    let nodes = compile_with(&events, source.text(), options)?;
    debug!(
        target: BLOCK_TARGET,
        language,
        offset = source.offset(),
        events = events.len(),
        nodes = nodes.len(),
        "compiled code block"
    );
    Ok(trim_trailing_newline(nodes))
}

fn selected_languages(names: &[String]) -> Vec<SupportedLanguage> {
    let mut languages: Vec<SupportedLanguage> = names
        .iter()
        .filter_map(|name| match name.parse::<SupportedLanguage>() {
            Ok(language) => Some(language),
            Err(err) => {
                warn!(
                    target: BLOCK_TARGET,
                    error = %err,
                    "ignoring unknown grammar name"
                );
                None
            }
        })
        .collect();
    languages.sort();
    languages.dedup();
    languages
}
