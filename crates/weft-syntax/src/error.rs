//! Error types for classification.
//!
//! A [`ClassifyError`] means no highlight event stream could be produced for
//! a block. Callers are expected to leave the block unhighlighted.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::language::SupportedLanguage;
use crate::queries::QueryKind;

/// Errors from loading queries or classifying source text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// The requested language name matches no statically linked grammar.
    #[error("unknown language: '{language}'")]
    UnknownLanguage {
        /// The language name as requested.
        language: String,
    },

    /// The grammar exists but its queries failed to load.
    #[error("language {language} is unavailable: {reason}")]
    LanguageUnavailable {
        /// The language whose queries failed.
        language: SupportedLanguage,
        /// Why the queries could not be loaded.
        reason: String,
    },

    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInit {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter produced no tree for the source.
    #[error("failed to parse {language}: {message}")]
    Parse {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A query file exists but could not be read.
    #[error("failed to read query file {path}: {message}")]
    QueryRead {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The merged query text did not compile against the grammar.
    #[error("invalid {kind} query for {language}: {message}")]
    QueryCompile {
        /// The language the query was compiled for.
        language: SupportedLanguage,
        /// Which query failed.
        kind: QueryKind,
        /// Description of the compilation failure.
        message: String,
    },
}

impl ClassifyError {
    /// Creates an unknown language error.
    #[must_use]
    pub fn unknown_language(language: impl Into<String>) -> Self {
        Self::UnknownLanguage {
            language: language.into(),
        }
    }

    /// Creates a language unavailable error.
    #[must_use]
    pub fn unavailable(language: SupportedLanguage, reason: impl Into<String>) -> Self {
        Self::LanguageUnavailable {
            language,
            reason: reason.into(),
        }
    }

    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::Parse {
            language,
            message: message.into(),
        }
    }

    /// Creates a query read error.
    #[must_use]
    pub fn query_read(path: Utf8PathBuf, message: impl Into<String>) -> Self {
        Self::QueryRead {
            path,
            message: message.into(),
        }
    }

    /// Creates a query compilation error.
    #[must_use]
    pub fn query_compile(
        language: SupportedLanguage,
        kind: QueryKind,
        message: impl Into<String>,
    ) -> Self {
        Self::QueryCompile {
            language,
            kind,
            message: message.into(),
        }
    }
}
