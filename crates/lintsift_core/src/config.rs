//! Rule configuration loading.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::FilterError;

/// Parsed lint rule configuration.
///
/// The mapping is opaque to the filter: rule names and their settings are
/// interpreted by the lint engine alone. Loaded once at node construction,
/// never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig(Value);

impl RuleConfig {
    /// Loads a rule config from `path`.
    ///
    /// A missing file at the conventional `default_path` is not an error:
    /// the linter runs with its built-in defaults (`Ok(None)`). A missing
    /// file anywhere else means the caller asked for something that is not
    /// there. A present file that fails to parse is an error either way.
    pub fn load(path: &Path, default_path: &Path) -> Result<Option<Self>, FilterError> {
        if !path.exists() {
            if path == default_path {
                debug!("No rule config at default path {}", path.display());
                return Ok(None);
            }
            return Err(FilterError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|source| FilterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(Self(value)))
    }

    /// Parses a rule config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Looks up the settings of a single rule.
    pub fn rule(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Value> for RuleConfig {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
