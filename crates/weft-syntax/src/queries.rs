//! Query text assembly from bundled queries and query directories.
//!
//! A query directory holds one subdirectory per language, each with optional
//! `highlights.scm` and `injections.scm` files. Directories are applied in
//! order over the bundled query: a file whose first line starts with
//! `;; extends` is appended to the query built so far, any other file
//! replaces it.

use std::fmt;
use std::fs;

use camino::Utf8PathBuf;

use crate::error::ClassifyError;
use crate::language::SupportedLanguage;

const EXTENDS_MARKER: &str = ";; extends";

/// The two query kinds a highlighter compiles per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Captures naming highlight scopes.
    Highlights,
    /// Captures marking embedded code in another language.
    Injections,
}

impl QueryKind {
    /// Returns the file name looked up in query directories.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Highlights => "highlights.scm",
            Self::Injections => "injections.scm",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Highlights => "highlights",
            Self::Injections => "injections",
        })
    }
}

/// Builds the query text of `kind` for `language`.
///
/// Missing files are skipped.
///
/// # Errors
///
/// Returns [`ClassifyError::QueryRead`] if a query file exists but cannot
/// be read.
pub fn load_query_text(
    language: SupportedLanguage,
    kind: QueryKind,
    query_dirs: &[Utf8PathBuf],
) -> Result<String, ClassifyError> {
    let mut text = language.bundled_query(kind).to_owned();

    for dir in query_dirs {
        let path = dir.join(language.as_str()).join(kind.file_name());
        if !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path)
            .map_err(|err| ClassifyError::query_read(path.clone(), err.to_string()))?;

        text = if is_extending(&contents) {
            merge_queries(&text, &contents)
        } else {
            contents
        };
    }

    Ok(text)
}

fn is_extending(contents: &str) -> bool {
    contents
        .lines()
        .next()
        .is_some_and(|line| line.trim_start().starts_with(EXTENDS_MARKER))
}

fn merge_queries(base: &str, overlay: &str) -> String {
    if base.is_empty() {
        return overlay.to_owned();
    }
    let mut merged = String::with_capacity(base.len() + overlay.len() + 1);
    merged.push_str(base);
    if !base.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(overlay);
    merged
}
