//! Configuration structures for quill settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Find/replace defaults
    #[serde(default)]
    pub search: SearchSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults used when a find/replace request leaves an option unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Match case
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    /// Match whole words only (literal searches)
    #[serde(default = "default_whole_word")]
    pub whole_word: bool,

    /// Treat search text as a regular expression
    #[serde(default = "default_regex")]
    pub regex: bool,

    /// Ask before each replacement
    #[serde(default = "default_confirm_replace")]
    pub confirm_replace: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_case_sensitive() -> bool {
    defaults::CASE_SENSITIVE
}

fn default_whole_word() -> bool {
    defaults::WHOLE_WORD
}

fn default_regex() -> bool {
    defaults::REGEX
}

fn default_confirm_replace() -> bool {
    defaults::CONFIRM_REPLACE
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            case_sensitive: default_case_sensitive(),
            whole_word: default_whole_word(),
            regex: default_regex(),
            confirm_replace: default_confirm_replace(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
