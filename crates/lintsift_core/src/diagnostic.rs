//! Diagnostic types for lint findings.

use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational message.
    Info,
    /// Should be reviewed.
    Warning,
    /// Must be fixed.
    #[default]
    Error,
    /// Unclassified finding.
    Default,
}

/// One finding reported by the lint engine for a single file.
///
/// Diagnostics are transient: produced during one file's processing call,
/// handed to the reporter, never persisted or mutated by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line the finding refers to.
    pub line_number: u32,

    /// Severity level.
    #[serde(default)]
    pub level: Level,

    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new error-level diagnostic.
    pub fn new(line_number: u32, message: impl Into<String>) -> Self {
        Self {
            line_number,
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Sets the severity level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}
