//! Filter node options.

use std::path::PathBuf;

use serde_json::{Value, json};

use crate::reporter::Formatter;

/// Conventional rule-config path, probed when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "lintsift.json";

/// Conventional ignore-file path, probed when no explicit path is given.
pub const DEFAULT_IGNORE_PATH: &str = ".lintsiftignore";

/// Caller-supplied configuration for a filter node.
///
/// Immutable once the node is constructed.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Whether cached results survive across process invocations.
    /// Default: true
    pub persist: bool,
    /// Path to the rule-config file.
    /// Default: [`DEFAULT_CONFIG_PATH`]
    pub config_path: PathBuf,
    /// Path to the ignore file.
    /// Default: [`DEFAULT_IGNORE_PATH`]
    pub lint_ignore_path: PathBuf,
    /// Diagnostic formatter.
    /// Default: the built-in stylish renderer
    pub format: Formatter,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            persist: true,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            lint_ignore_path: PathBuf::from(DEFAULT_IGNORE_PATH),
            format: Formatter::Stylish,
        }
    }
}

impl FilterOptions {
    /// Creates options with the conventional defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables cache persistence.
    pub fn persist(mut self, yes: bool) -> Self {
        self.persist = yes;
        self
    }

    /// Sets the rule-config path.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Sets the ignore-file path.
    pub fn lint_ignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lint_ignore_path = path.into();
        self
    }

    /// Sets the diagnostic formatter.
    pub fn format(mut self, format: Formatter) -> Self {
        self.format = format;
        self
    }

    /// The structural view of these options that feeds the fingerprint.
    pub(crate) fn fingerprint_material(&self) -> Value {
        json!({
            "persist": self.persist,
            "config_path": self.config_path,
            "lint_ignore_path": self.lint_ignore_path,
            "format": self.format.name(),
        })
    }
}
