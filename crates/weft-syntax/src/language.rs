//! Statically linked grammars and their bundled queries.
//!
//! This module provides the [`SupportedLanguage`] enum, the registry of
//! Tree-sitter grammars the highlighter can drive, and maps each one to the
//! highlight and injection queries shipped with its grammar crate.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::queries::QueryKind;

/// Languages the highlighter can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SupportedLanguage {
    /// Rust (`rust`, `rs`).
    Rust,
    /// Python (`python`, `py`).
    Python,
    /// TypeScript, parsed with the TSX grammar (`typescript`, `ts`, `tsx`).
    TypeScript,
}

impl SupportedLanguage {
    /// Returns the Tree-sitter language grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            // TSX is a superset, so plain `.ts` blocks parse too.
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the query of `kind` bundled with the grammar crate.
    ///
    /// Grammars that ship no query of that kind return an empty string.
    #[must_use]
    pub const fn bundled_query(self, kind: QueryKind) -> &'static str {
        match (self, kind) {
            (Self::Rust, QueryKind::Highlights) => tree_sitter_rust::HIGHLIGHTS_QUERY,
            (Self::Rust, QueryKind::Injections) => tree_sitter_rust::INJECTIONS_QUERY,
            (Self::Python, QueryKind::Highlights) => tree_sitter_python::HIGHLIGHTS_QUERY,
            (Self::TypeScript, QueryKind::Highlights) => tree_sitter_typescript::HIGHLIGHTS_QUERY,
            (Self::Python | Self::TypeScript, QueryKind::Injections) => "",
        }
    }

    /// Returns the lower-case identifier for this language.
    ///
    /// This is also the directory name looked up inside query directories.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Rust, Self::Python, Self::TypeScript]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "python" | "py" => Ok(Self::Python),
            "typescript" | "ts" | "tsx" => Ok(Self::TypeScript),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
