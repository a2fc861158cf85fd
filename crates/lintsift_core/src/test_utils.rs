//! Lint doubles and console capture for unit tests.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::config::RuleConfig;
use crate::diagnostic::Diagnostic;
use crate::linter::{Lint, LintFailure};

/// A linter that returns a fixed script of diagnostics and records how it
/// was called.
pub struct ScriptedLinter {
    diagnostics: Vec<Diagnostic>,
    calls: AtomicUsize,
    last_rules: Mutex<Option<Value>>,
}

impl ScriptedLinter {
    /// A linter that never finds anything.
    pub fn clean() -> Self {
        Self::reporting(Vec::new())
    }

    /// A linter that reports `diagnostics` for every file.
    pub fn reporting(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            calls: AtomicUsize::new(0),
            last_rules: Mutex::new(None),
        }
    }

    /// Number of times `lint` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The rule config passed to the most recent `lint` call.
    pub fn last_rules(&self) -> Option<Value> {
        self.last_rules.lock().unwrap().clone()
    }
}

impl Lint for ScriptedLinter {
    fn extensions(&self) -> &[&str] {
        &["ext"]
    }

    fn lint(
        &self,
        _source: &str,
        rules: Option<&RuleConfig>,
    ) -> Result<Vec<Diagnostic>, LintFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_rules.lock().unwrap() = rules.map(|r| r.as_value().clone());
        Ok(self.diagnostics.clone())
    }
}

/// A linter whose engine fails on every file.
pub struct FailingLinter {
    failure: LintFailure,
}

impl FailingLinter {
    pub fn new(failure: LintFailure) -> Self {
        Self { failure }
    }
}

impl Lint for FailingLinter {
    fn extensions(&self) -> &[&str] {
        &["ext"]
    }

    fn lint(
        &self,
        _source: &str,
        _rules: Option<&RuleConfig>,
    ) -> Result<Vec<Diagnostic>, LintFailure> {
        Err(self.failure.clone())
    }
}

/// A cloneable in-memory console sink.
#[derive(Clone, Default)]
pub struct CapturedConsole(Arc<Mutex<Vec<u8>>>);

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
