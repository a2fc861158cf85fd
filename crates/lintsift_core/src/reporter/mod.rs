//! Diagnostic reporting.

mod stylish;

pub use stylish::Stylish;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crate::diagnostic::Diagnostic;

/// Renders one file's diagnostics to a stream.
///
/// Reporting is a side effect: the return value of a report never
/// influences processing, and diagnostics are consumed, not mutated.
pub trait Report: Send + Sync {
    /// Writes the report for `path` to `out`.
    fn report(&self, out: &mut dyn Write, path: &str, diagnostics: &[Diagnostic])
    -> io::Result<()>;
}

/// The formatter a filter node reports through.
///
/// A closed union: either the built-in stylish renderer or a caller-supplied
/// [`Report`] implementation. Resolving formatter names to loadable modules
/// is a host concern and happens before node construction.
#[derive(Clone, Default)]
pub enum Formatter {
    /// The built-in stylish renderer.
    #[default]
    Stylish,
    /// A caller-supplied reporter.
    Custom(Arc<dyn Report>),
}

impl Formatter {
    /// Stable name of this formatter, used as fingerprint material.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stylish => "stylish",
            Self::Custom(_) => "custom",
        }
    }

    pub(crate) fn report(
        &self,
        out: &mut dyn Write,
        path: &str,
        diagnostics: &[Diagnostic],
    ) -> io::Result<()> {
        match self {
            Self::Stylish => Stylish.report(out, path, diagnostics),
            Self::Custom(custom) => custom.report(out, path, diagnostics),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stylish => f.write_str("Stylish"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
