//! Configuration for the weft code block highlighter.
//!
//! [`Config`] gathers the grammar selection, query directories, query
//! aliases, highlight renaming, class rendering mode, highlighter cache size
//! and logging settings. It is read from JSON; every field is optional and
//! unknown fields are rejected.
//!
//! ```json
//! {
//!   "languages": ["rust", "python"],
//!   "query_dirs": ["queries"],
//!   "query_aliases": { "docs": "queries/docs" },
//!   "highlight_mapping": { "keyword": "hl-keyword" },
//!   "class_mode": "innermost",
//!   "cache_capacity": 8,
//!   "log_filter": "weft=debug",
//!   "log_format": "json"
//! }
//! ```

mod defaults;
mod error;
mod logging;

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use weft_core::{ClassMode, CompileOptions, HighlightMapping};

pub use defaults::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_LOG_FILTER, default_log_filter_string, default_log_format,
};
pub use error::ConfigError;
pub use logging::{LogFormat, LogFormatParseError};

/// Highlighter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Grammar names to load. Empty loads every supported grammar.
    pub languages: Vec<String>,
    /// Query directories applied in order over the bundled queries.
    pub query_dirs: Vec<Utf8PathBuf>,
    /// Query directories selectable per block with `query=<alias>`.
    pub query_aliases: BTreeMap<String, Utf8PathBuf>,
    /// Renames applied to highlight names before they become classes.
    pub highlight_mapping: BTreeMap<String, String>,
    /// How visible highlight tags become classes.
    pub class_mode: ClassMode,
    /// Number of call-scoped highlighters to cache. Zero disables caching.
    pub cache_capacity: usize,
    /// Tracing filter directive, such as `info` or `weft=debug`.
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            query_dirs: Vec::new(),
            query_aliases: BTreeMap::new(),
            highlight_mapping: BTreeMap::new(),
            class_mode: ClassMode::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Parses configuration from JSON text.
    ///
    /// Paths are kept as written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid
    /// configuration object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { source })
    }

    /// Loads configuration from a JSON file.
    ///
    /// Relative query directories and alias targets are resolved against the
    /// directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read or
    /// [`ConfigError::ParseFile`] if its contents are not valid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_str(&text).map_err(|source| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Returns the query directory registered under `alias`.
    #[must_use]
    pub fn query_alias(&self, alias: &str) -> Option<&Utf8Path> {
        self.query_aliases.get(alias).map(Utf8PathBuf::as_path)
    }

    /// Builds the compile options described by this configuration.
    #[must_use]
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            class_mode: self.class_mode,
            mapping: self
                .highlight_mapping
                .iter()
                .map(|(highlight, class)| (highlight.as_str(), class.as_str()))
                .collect::<HighlightMapping>(),
        }
    }

    fn resolve_relative_to(&mut self, base: &Utf8Path) {
        let resolve = |path: &mut Utf8PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        self.query_dirs.iter_mut().for_each(resolve);
        self.query_aliases.values_mut().for_each(resolve);
    }
}
