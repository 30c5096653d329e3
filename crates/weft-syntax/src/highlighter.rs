//! The Tree-sitter backed classifier.
//!
//! A [`Highlighter`] owns the compiled queries for a set of languages. It
//! holds no parser state, so one instance can classify concurrently from
//! many threads; each call creates its own `tree_sitter::Parser`.

use std::collections::BTreeMap;
use std::str::FromStr;

use camino::Utf8PathBuf;
use tracing::{debug, warn};
use tree_sitter::{Parser, Query};
use weft_core::HighlightEvent;

use crate::captures::{collect_highlights, collect_injections};
use crate::error::ClassifyError;
use crate::language::SupportedLanguage;
use crate::queries::{QueryKind, load_query_text};
use crate::sweep::{Region, sweep};

const HIGHLIGHTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::highlighter");

/// Deepest injection nesting that is expanded.
pub const MAX_INJECTION_DEPTH: usize = 8;

/// Maps source text in a named language to a highlight event stream.
pub trait Classifier {
    /// Classifies `source` as `language`.
    ///
    /// The returned stream is balanced and its source ranges cover
    /// `0..source.len()` exactly once.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] if the language is unknown or unavailable
    /// or the parser fails.
    fn classify(&self, source: &str, language: &str) -> Result<Vec<HighlightEvent>, ClassifyError>;
}

/// The grammars and query directories a highlighter is built from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlighterSources {
    /// Languages to load. Empty means every supported language.
    pub languages: Vec<SupportedLanguage>,
    /// Query directories applied in order over the bundled queries.
    pub query_dirs: Vec<Utf8PathBuf>,
}

impl HighlighterSources {
    /// Creates sources for every supported language with no query
    /// directories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `extra` query directories applied after these.
    #[must_use]
    pub fn extended(&self, extra: &[Utf8PathBuf]) -> Self {
        let mut query_dirs = self.query_dirs.clone();
        query_dirs.extend(extra.iter().cloned());
        Self {
            languages: self.languages.clone(),
            query_dirs,
        }
    }

    fn selected_languages(&self) -> &[SupportedLanguage] {
        if self.languages.is_empty() {
            SupportedLanguage::all()
        } else {
            &self.languages
        }
    }
}

/// Compiled queries for one language.
struct LanguageQueries {
    grammar: tree_sitter::Language,
    highlights: Query,
    injections: Option<Query>,
}

impl LanguageQueries {
    fn load(
        language: SupportedLanguage,
        query_dirs: &[Utf8PathBuf],
    ) -> Result<Self, ClassifyError> {
        let grammar = language.tree_sitter_language();
        let highlights = compile_query(language, &grammar, QueryKind::Highlights, query_dirs)?;
        let injections = compile_query(language, &grammar, QueryKind::Injections, query_dirs)?;
        Ok(Self {
            grammar,
            highlights,
            injections: (injections.pattern_count() > 0).then_some(injections),
        })
    }
}

fn compile_query(
    language: SupportedLanguage,
    grammar: &tree_sitter::Language,
    kind: QueryKind,
    query_dirs: &[Utf8PathBuf],
) -> Result<Query, ClassifyError> {
    let text = load_query_text(language, kind, query_dirs)?;
    Query::new(grammar, &text)
        .map_err(|err| ClassifyError::query_compile(language, kind, err.to_string()))
}

/// A grammar-based classifier over statically linked Tree-sitter grammars.
pub struct Highlighter {
    languages: BTreeMap<SupportedLanguage, LanguageQueries>,
    unavailable: BTreeMap<SupportedLanguage, String>,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("languages", &self.languages.keys().collect::<Vec<_>>())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

impl Highlighter {
    /// Builds a highlighter from `sources`.
    ///
    /// A language whose queries cannot be read or compiled is left out with
    /// a warning; classifying it later fails with
    /// [`ClassifyError::LanguageUnavailable`].
    #[must_use]
    pub fn build(sources: &HighlighterSources) -> Self {
        let mut languages = BTreeMap::new();
        let mut unavailable = BTreeMap::new();

        for &language in sources.selected_languages() {
            match LanguageQueries::load(language, &sources.query_dirs) {
                Ok(queries) => {
                    languages.insert(language, queries);
                }
                Err(err) => {
                    warn!(
                        target: HIGHLIGHTER_TARGET,
                        %language,
                        error = %err,
                        "dropping language with unusable queries"
                    );
                    unavailable.insert(language, err.to_string());
                }
            }
        }

        debug!(
            target: HIGHLIGHTER_TARGET,
            languages = languages.len(),
            unavailable = unavailable.len(),
            query_dirs = sources.query_dirs.len(),
            "built highlighter"
        );

        Self {
            languages,
            unavailable,
        }
    }

    /// Returns whether `language` can be classified.
    #[must_use]
    pub fn supports(&self, language: SupportedLanguage) -> bool {
        self.languages.contains_key(&language)
    }

    /// Classifies `source` as a supported language.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::LanguageUnavailable`] if the language was not
    /// loaded, or a parser error if Tree-sitter fails.
    pub fn highlight(
        &self,
        source: &str,
        language: SupportedLanguage,
    ) -> Result<Vec<HighlightEvent>, ClassifyError> {
        self.queries_for(language)?;

        // Some grammars only close their last construct on a newline.
        let parsed: std::borrow::Cow<'_, str> = if source.ends_with('\n') {
            source.into()
        } else {
            format!("{source}\n").into()
        };
        let body_end = parsed.len().saturating_sub(1);

        let mut parser = Parser::new();
        let regions = self.layer_regions(&mut parser, &parsed, language, 0)?;
        Ok(sweep(regions, body_end, source.len()))
    }

    fn queries_for(&self, language: SupportedLanguage) -> Result<&LanguageQueries, ClassifyError> {
        self.languages.get(&language).ok_or_else(|| {
            let reason = self
                .unavailable
                .get(&language)
                .map_or("language was not loaded", String::as_str);
            ClassifyError::unavailable(language, reason)
        })
    }

    /// Collects the regions of one parse layer and its injections, in the
    /// coordinates of `source`.
    fn layer_regions(
        &self,
        parser: &mut Parser,
        source: &str,
        language: SupportedLanguage,
        depth: usize,
    ) -> Result<Vec<Region>, ClassifyError> {
        let queries = self.queries_for(language)?;
        parser
            .set_language(&queries.grammar)
            .map_err(|err| ClassifyError::parser_init(language, err.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ClassifyError::parse(language, "parser returned no tree"))?;
        let root = tree.root_node();

        let mut regions: Vec<Region> =
            collect_highlights(&queries.highlights, root, source.as_bytes())
                .into_iter()
                .map(|capture| Region {
                    range: capture.range,
                    highlight: capture.highlight,
                    depth,
                    pattern_index: capture.pattern_index,
                })
                .collect();

        let Some(injections) = queries.injections.as_ref() else {
            return Ok(regions);
        };
        if depth >= MAX_INJECTION_DEPTH {
            debug!(
                target: HIGHLIGHTER_TARGET,
                %language,
                depth,
                "injection depth limit reached"
            );
            return Ok(regions);
        }

        for injection in collect_injections(injections, root, source) {
            let Ok(injected) = SupportedLanguage::from_str(&injection.language) else {
                debug!(
                    target: HIGHLIGHTER_TARGET,
                    language = %injection.language,
                    "skipping injection of unknown language"
                );
                continue;
            };
            let Some(content) = source.get(injection.range.clone()) else {
                continue;
            };
            let inner = match self.layer_regions(parser, content, injected, depth + 1) {
                Ok(inner) => inner,
                Err(err) => {
                    debug!(
                        target: HIGHLIGHTER_TARGET,
                        language = %injected,
                        error = %err,
                        "skipping injection"
                    );
                    continue;
                }
            };

            let offset = injection.range.start;
            regions.extend(inner.into_iter().map(|region| Region {
                range: region.range.start + offset..region.range.end + offset,
                ..region
            }));
        }

        Ok(regions)
    }
}

impl Classifier for Highlighter {
    fn classify(&self, source: &str, language: &str) -> Result<Vec<HighlightEvent>, ClassifyError> {
        let language = SupportedLanguage::from_str(language)
            .map_err(|err| ClassifyError::unknown_language(err.input()))?;
        self.highlight(source, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use weft_core::{compile, concatenate};

    #[fixture]
    fn highlighter() -> Highlighter {
        Highlighter::build(&HighlighterSources::new())
    }

    fn balance(events: &[HighlightEvent]) -> isize {
        events.iter().fold(0, |depth, event| match event {
            HighlightEvent::Start { .. } => depth + 1,
            HighlightEvent::End => depth - 1,
            HighlightEvent::Source { .. } => depth,
        })
    }

    #[rstest]
    fn loads_every_language_by_default(highlighter: Highlighter) {
        for &language in SupportedLanguage::all() {
            assert!(highlighter.supports(language), "{language} not loaded");
        }
    }

    #[rstest]
    #[case("rust", "fn main() {\n    let x = \"hi\";\n}\n")]
    #[case("py", "def greet(name):\n    return f'hi {name}'\n")]
    #[case("tsx", "const x: number = 1;")]
    #[case("rust", "")]
    fn streams_are_balanced_and_cover_the_source(
        highlighter: Highlighter,
        #[case] language: &str,
        #[case] source: &str,
    ) {
        let events = highlighter.classify(source, language).expect("classify");

        assert_eq!(balance(&events), 0);
        let nodes = compile(&events, source).expect("compile");
        assert_eq!(concatenate(&nodes), source);
    }

    #[rstest]
    fn final_newline_is_its_own_plain_span(highlighter: Highlighter) {
        let source = "// comment\n";

        let events = highlighter.classify(source, "rust").expect("classify");

        assert_eq!(events.last(), Some(&HighlightEvent::source(10, 11)));
    }

    #[rstest]
    fn keyword_is_highlighted(highlighter: Highlighter) {
        let source = "fn main() {}\n";

        let events = highlighter.classify(source, "rust").expect("classify");
        let nodes = compile(&events, source).expect("compile");

        assert_eq!(
            nodes.first().map(|node| (node.class(), node.value())),
            Some((Some("keyword"), "fn"))
        );
    }

    #[rstest]
    fn unknown_languages_are_rejected(highlighter: Highlighter) {
        let error = highlighter.classify("x", "cobol").expect_err("unknown");
        assert!(matches!(
            error,
            ClassifyError::UnknownLanguage { ref language } if language == "cobol"
        ));
    }

    #[test]
    fn unselected_languages_are_unavailable() {
        let highlighter = Highlighter::build(&HighlighterSources {
            languages: vec![SupportedLanguage::Python],
            query_dirs: Vec::new(),
        });

        let error = highlighter.classify("fn f() {}", "rust").expect_err("unavailable");

        assert!(matches!(
            error,
            ClassifyError::LanguageUnavailable {
                language: SupportedLanguage::Rust,
                ..
            }
        ));
    }

    #[test]
    fn extended_sources_keep_base_directories_first() {
        let base = HighlighterSources {
            languages: Vec::new(),
            query_dirs: vec![Utf8PathBuf::from("base")],
        };

        let extended = base.extended(&[Utf8PathBuf::from("extra")]);

        assert_eq!(
            extended.query_dirs,
            vec![Utf8PathBuf::from("base"), Utf8PathBuf::from("extra")]
        );
    }
}
