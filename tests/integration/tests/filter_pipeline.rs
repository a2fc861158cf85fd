//! End-to-end pipeline tests.
//!
//! Drives a real linter implementation through the caching engine against
//! on-disk trees: pass-through, cache reuse across engine instances,
//! fingerprint invalidation, ignore files, and failure propagation.

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use lintsift_core::{
    CachingFilterEngine, Diagnostic, FilterError, FilterNode, FilterOptions, Formatter, Level,
    Lint, LintFailure, LintFilter, Report, RuleConfig, SourceLocation,
};

/// A small linter over `.note` files: flags `TODO` lines as warnings and
/// lines beyond the configured `max_line_length` as errors. A line reading
/// `%%fail%%` makes the engine itself blow up at that position.
struct NoteLinter;

impl Lint for NoteLinter {
    fn extensions(&self) -> &[&str] {
        &["note"]
    }

    fn lint(
        &self,
        source: &str,
        rules: Option<&RuleConfig>,
    ) -> Result<Vec<Diagnostic>, LintFailure> {
        let max_len = rules
            .and_then(|r| r.rule("max_line_length"))
            .and_then(|v| v.get("value"))
            .and_then(|v| v.as_u64())
            .unwrap_or(80) as usize;

        let mut diagnostics = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let line_number = (index + 1) as u32;

            if line.trim() == "%%fail%%" {
                return Err(LintFailure::new("unparsable construct").with_location(
                    SourceLocation {
                        first_line: line_number,
                        first_column: 0,
                    },
                ));
            }
            if line.contains("TODO") {
                diagnostics
                    .push(Diagnostic::new(line_number, "TODO left in source")
                        .with_level(Level::Warning));
            }
            if line.len() > max_len {
                diagnostics.push(Diagnostic::new(line_number, "Line exceeds maximum length"));
            }
        }
        Ok(diagnostics)
    }
}

/// Reporter double that records every (path, diagnostics) report.
#[derive(Clone, Default)]
struct RecordingReporter {
    reports: Arc<Mutex<Vec<(String, Vec<Diagnostic>)>>>,
}

impl RecordingReporter {
    fn reports(&self) -> Vec<(String, Vec<Diagnostic>)> {
        self.reports.lock().unwrap().clone()
    }
}

impl Report for RecordingReporter {
    fn report(
        &self,
        _out: &mut dyn Write,
        path: &str,
        diagnostics: &[Diagnostic],
    ) -> io::Result<()> {
        self.reports
            .lock()
            .unwrap()
            .push((path.to_string(), diagnostics.to_vec()));
        Ok(())
    }
}

struct Pipeline {
    temp: TempDir,
    reporter: RecordingReporter,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            reporter: RecordingReporter::default(),
        }
    }

    fn write_input(&self, rel: &str, content: &str) {
        let path = self.temp.path().join("input").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_rules(&self, json: &str) {
        fs::write(self.temp.path().join("rules.json"), json).unwrap();
    }

    fn write_ignores(&self, patterns: &str) {
        fs::write(self.temp.path().join("ignores"), patterns).unwrap();
    }

    fn node(&self) -> LintFilter {
        let mut options =
            FilterOptions::new().format(Formatter::Custom(Arc::new(self.reporter.clone())));
        let rules = self.temp.path().join("rules.json");
        if rules.exists() {
            options = options.config_path(rules);
        }
        let ignores = self.temp.path().join("ignores");
        if ignores.exists() {
            options = options.lint_ignore_path(ignores);
        }
        LintFilter::new(Arc::new(NoteLinter), options).unwrap()
    }

    fn engine(&self, persist: bool) -> CachingFilterEngine {
        CachingFilterEngine::new(
            self.temp.path().join("input"),
            self.temp.path().join("output"),
            self.temp.path().join("cache"),
            persist,
        )
    }

    fn output(&self, rel: &str) -> String {
        fs::read_to_string(self.temp.path().join("output").join(rel)).unwrap()
    }
}

#[test]
fn lints_and_passes_content_through_unchanged() {
    let pipeline = Pipeline::new();
    pipeline.write_rules("{}");
    pipeline.write_input("good.note", "all fine here\n");
    pipeline.write_input("bad.note", "fine\nfine\nTODO fix this later\n");

    let node = pipeline.node();
    let summary = pipeline.engine(true).run(&node).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(pipeline.output("good.note"), "all fine here\n");
    assert_eq!(
        pipeline.output("bad.note"),
        "fine\nfine\nTODO fix this later\n"
    );

    let reports = pipeline.reporter.reports();
    let bad = reports.iter().find(|(path, _)| path == "bad.note").unwrap();
    assert_eq!(bad.1.len(), 1);
    assert_eq!(bad.1[0].line_number, 3);
    assert_eq!(bad.1[0].level, Level::Warning);
}

#[test]
fn error_level_diagnostics_do_not_fail_the_build() {
    let pipeline = Pipeline::new();
    pipeline.write_rules(r#"{ "max_line_length": { "value": 10 } }"#);
    let long = "this line is far beyond ten characters\n";
    pipeline.write_input("long.note", long);

    let node = pipeline.node();
    pipeline.engine(true).run(&node).unwrap();

    assert_eq!(pipeline.output("long.note"), long);
    let reports = pipeline.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].1[0].level, Level::Error);
}

#[test]
fn second_run_reuses_cache_and_skips_lint_and_report() {
    let pipeline = Pipeline::new();
    pipeline.write_input("a.note", "TODO one\n");

    let node = pipeline.node();
    let first = pipeline.engine(true).run(&node).unwrap();
    assert_eq!(first.processed, 1);
    assert_eq!(pipeline.reporter.reports().len(), 1);

    // Same tree, fresh engine and node: served from the persistent cache,
    // so no new lint runs and no new report is emitted.
    let node = pipeline.node();
    let second = pipeline.engine(true).run(&node).unwrap();

    assert_eq!(second.processed, 0);
    assert_eq!(second.from_cache, 1);
    assert_eq!(pipeline.reporter.reports().len(), 1);
    assert_eq!(pipeline.output("a.note"), "TODO one\n");
}

#[test]
fn rule_change_invalidates_cached_results() {
    let pipeline = Pipeline::new();
    pipeline.write_rules(r#"{ "max_line_length": { "value": 80 } }"#);
    pipeline.write_input("a.note", "short\n");

    let node = pipeline.node();
    pipeline.engine(true).run(&node).unwrap();

    pipeline.write_rules(r#"{ "max_line_length": { "value": 3 } }"#);

    let node = pipeline.node();
    let summary = pipeline.engine(true).run(&node).unwrap();

    assert_eq!(summary.from_cache, 0);
    assert_eq!(summary.processed, 1);

    // The tightened rule now flags the same bytes.
    let reports = pipeline.reporter.reports();
    assert_eq!(reports.last().unwrap().1[0].message, "Line exceeds maximum length");
}

#[test]
fn equivalent_rule_files_with_different_key_order_share_the_cache() {
    let pipeline = Pipeline::new();
    pipeline.write_rules(r#"{ "max_line_length": { "value": 80 }, "no_todo": true }"#);
    pipeline.write_input("a.note", "short\n");

    let node = pipeline.node();
    pipeline.engine(true).run(&node).unwrap();

    // Same settings, different key order: fingerprints must agree.
    pipeline.write_rules(r#"{ "no_todo": true, "max_line_length": { "value": 80 } }"#);

    let node = pipeline.node();
    let summary = pipeline.engine(true).run(&node).unwrap();

    assert_eq!(summary.from_cache, 1);
    assert_eq!(summary.processed, 0);
}

#[test]
fn ignored_files_are_passed_through_without_reports() {
    let pipeline = Pipeline::new();
    pipeline.write_ignores("ignored/*\n");
    pipeline.write_input("ignored/skip.note", "TODO everywhere\n");
    pipeline.write_input("kept/run.note", "TODO here too\n");

    let node = pipeline.node();
    let summary = pipeline.engine(true).run(&node).unwrap();

    // Both files are claimed and emitted, but only the kept one is reported.
    assert_eq!(summary.processed, 2);
    assert_eq!(pipeline.output("ignored/skip.note"), "TODO everywhere\n");

    let reports = pipeline.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "kept/run.note");
}

#[test]
fn unclaimed_files_are_copied_untouched() {
    let pipeline = Pipeline::new();
    pipeline.write_input("readme.md", "# docs\n");
    pipeline.write_input("a.note", "fine\n");

    let node = pipeline.node();
    let summary = pipeline.engine(true).run(&node).unwrap();

    assert_eq!(summary.copied, 1);
    assert_eq!(pipeline.output("readme.md"), "# docs\n");
    assert!(pipeline.reporter.reports().iter().all(|(p, _)| p != "readme.md"));
}

#[test]
fn persist_false_processes_fresh_every_run() {
    let pipeline = Pipeline::new();
    pipeline.write_input("a.note", "fine\n");

    let node = pipeline.node();
    pipeline.engine(false).run(&node).unwrap();

    let node = pipeline.node();
    let summary = pipeline.engine(false).run(&node).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.from_cache, 0);
    assert!(!pipeline.temp.path().join("cache").exists());
}

#[test]
fn lint_engine_failure_carries_position_to_the_host() {
    let pipeline = Pipeline::new();
    pipeline.write_input("broken.note", "ok\n%%fail%%\n");

    let node = pipeline.node();
    let err = pipeline.engine(true).run(&node).unwrap_err();

    match err {
        FilterError::Lint(failure) => {
            assert_eq!(failure.line, Some(2));
            assert_eq!(failure.column, Some(0));
            assert_eq!(failure.message, "unparsable construct");
        }
        other => panic!("Expected a lint failure, got {other:?}"),
    }
}

#[test]
fn explicit_missing_paths_abort_construction() {
    let pipeline = Pipeline::new();

    let missing_config = FilterOptions::new().config_path(pipeline.temp.path().join("absent.json"));
    assert!(matches!(
        LintFilter::new(Arc::new(NoteLinter), missing_config),
        Err(FilterError::ConfigNotFound { .. })
    ));

    let missing_ignores =
        FilterOptions::new().lint_ignore_path(pipeline.temp.path().join("absent-ignores"));
    assert!(matches!(
        LintFilter::new(Arc::new(NoteLinter), missing_ignores),
        Err(FilterError::IgnoreFileNotFound { .. })
    ));
}

#[test]
fn node_declares_its_claim() {
    let pipeline = Pipeline::new();
    let node = pipeline.node();

    assert_eq!(node.extensions(), vec!["note".to_string()]);
    assert_eq!(node.target_extension(), "note");
}
