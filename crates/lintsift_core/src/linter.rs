//! The lint capability consumed by the filter node.

use thiserror::Error;

use crate::config::RuleConfig;
use crate::diagnostic::Diagnostic;

/// A lint engine the filter node can drive.
///
/// Implementations are pure with respect to their inputs: the same source
/// text and rule configuration always produce the same diagnostics, in
/// source-occurrence order. The filter never reorders them.
pub trait Lint: Send + Sync {
    /// File extensions (without the dot) this linter claims.
    fn extensions(&self) -> &[&str];

    /// Lints `source` under `rules`, returning findings in emission order.
    ///
    /// `rules` is absent when no config file was present at the conventional
    /// default path; the engine then applies its built-in defaults.
    fn lint(&self, source: &str, rules: Option<&RuleConfig>) -> Result<Vec<Diagnostic>, LintFailure>;
}

/// Position of a failure inside the source being linted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based first line of the failing construct.
    pub first_line: u32,
    /// 0-based first column of the failing construct.
    pub first_column: u32,
}

/// A failure raised by the lint engine itself, as opposed to a diagnostic
/// it reports. Fatal for the file being processed.
///
/// `line` and `column` mirror the nested location once the filter has
/// augmented the failure; error-reporting layers can read them without
/// knowing the location shape.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LintFailure {
    /// Human-readable description of the failure.
    pub message: String,

    /// Position payload, when the engine produced one.
    pub location: Option<SourceLocation>,

    /// First line of `location`, copied up during augmentation.
    pub line: Option<u32>,

    /// First column of `location`, copied up during augmentation.
    pub column: Option<u32>,
}

impl LintFailure {
    /// Creates a failure without position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            line: None,
            column: None,
        }
    }

    /// Attaches a source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Copies the nested location onto the top-level `line`/`column` fields.
    ///
    /// Runs unconditionally before the failure is re-raised; without a
    /// location the fields stay empty.
    pub(crate) fn propagate_location(mut self) -> Self {
        self.line = self.location.map(|loc| loc.first_line);
        self.column = self.location.map(|loc| loc.first_column);
        self
    }
}
