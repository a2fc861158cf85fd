//! The lint filter node.

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use lintsift_cache::CacheStore;

use crate::config::RuleConfig;
use crate::error::FilterError;
use crate::fingerprint;
use crate::ignore_file::IgnoreRules;
use crate::linter::Lint;
use crate::options::{DEFAULT_CONFIG_PATH, DEFAULT_IGNORE_PATH, FilterOptions};

/// The per-file callbacks a caching filter-tree engine drives.
///
/// The engine decides hit or miss from the file's content plus
/// [`cache_key_extra`](FilterNode::cache_key_extra) and only calls
/// [`process_one`](FilterNode::process_one) on a miss.
pub trait FilterNode: Send + Sync {
    /// File extensions (without the dot) this node claims in the input tree.
    fn extensions(&self) -> Vec<String>;

    /// Extension of the files this node emits.
    fn target_extension(&self) -> String;

    /// The full cache key for one file: node fingerprint first, then a
    /// content-derived key, so a config change invalidates every entry even
    /// when content is byte-identical to a previous run.
    fn cache_key_extra(&self, content: &str, relative_path: &str) -> String;

    /// Processes one file's content, returning the output content.
    fn process_one(&self, content: &str, relative_path: &str) -> Result<String, FilterError>;
}

/// A filter node that lints claimed files and passes their content through
/// unchanged.
///
/// The rule config and ignore rules are loaded once at construction and
/// shared read-only across all per-file calls; the fingerprint is computed
/// on first use under a single-initialization cell.
pub struct LintFilter {
    options: FilterOptions,
    linter: Arc<dyn Lint>,
    rule_config: Option<RuleConfig>,
    ignore_rules: Option<IgnoreRules>,
    console: Mutex<Box<dyn Write + Send>>,
    fingerprint: OnceLock<String>,
}

impl std::fmt::Debug for LintFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintFilter")
            .field("options", &self.options)
            .field("rule_config", &self.rule_config)
            .field("ignore_rules", &self.ignore_rules)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

impl LintFilter {
    /// Constructs a filter node around `linter`.
    ///
    /// Fails when an explicitly configured config or ignore path is missing,
    /// or when a present config file does not parse; absence of either file
    /// at its conventional default path is a silent fallback.
    pub fn new(linter: Arc<dyn Lint>, options: FilterOptions) -> Result<Self, FilterError> {
        let rule_config =
            RuleConfig::load(&options.config_path, Path::new(DEFAULT_CONFIG_PATH))?;
        let ignore_rules =
            IgnoreRules::load(&options.lint_ignore_path, Path::new(DEFAULT_IGNORE_PATH))?;

        Ok(Self {
            options,
            linter,
            rule_config,
            ignore_rules,
            console: Mutex::new(Box::new(io::stdout())),
            fingerprint: OnceLock::new(),
        })
    }

    /// Replaces the console sink reports are written to. Default: stdout.
    pub fn with_console(mut self, console: Box<dyn Write + Send>) -> Self {
        self.console = Mutex::new(console);
        self
    }

    /// The options this node was constructed with.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// The loaded rule config, absent when the default file was missing.
    pub fn rule_config(&self) -> Option<&RuleConfig> {
        self.rule_config.as_ref()
    }

    /// The loaded ignore rules, absent when the default file was missing.
    pub fn ignore_rules(&self) -> Option<&IgnoreRules> {
        self.ignore_rules.as_ref()
    }

    /// Digest identifying the combination of options, rule config, and
    /// ignore rules. Computed at most once per node.
    pub fn fingerprint(&self) -> &str {
        self.fingerprint.get_or_init(|| {
            fingerprint::compute(
                &self.options.fingerprint_material(),
                self.rule_config.as_ref().map(RuleConfig::as_value),
                self.ignore_rules.as_ref().map(IgnoreRules::source),
            )
        })
    }
}

impl FilterNode for LintFilter {
    fn extensions(&self) -> Vec<String> {
        self.linter
            .extensions()
            .iter()
            .map(|ext| (*ext).to_string())
            .collect()
    }

    fn target_extension(&self) -> String {
        self.linter
            .extensions()
            .first()
            .map_or_else(String::new, |ext| (*ext).to_string())
    }

    fn cache_key_extra(&self, content: &str, relative_path: &str) -> String {
        format!(
            "{}{}",
            self.fingerprint(),
            CacheStore::content_key(content, relative_path)
        )
    }

    fn process_one(&self, content: &str, relative_path: &str) -> Result<String, FilterError> {
        if let Some(rules) = &self.ignore_rules
            && !rules.should_lint(relative_path)
        {
            return Ok(content.to_owned());
        }

        let diagnostics = self
            .linter
            .lint(content, self.rule_config.as_ref())
            .map_err(|failure| FilterError::Lint(failure.propagate_location()))?;

        let mut console = self
            .console
            .lock()
            .map_err(|_| FilterError::internal("Console mutex poisoned"))?;
        self.options
            .format
            .report(&mut **console, relative_path, &diagnostics)?;

        Ok(content.to_owned())
    }
}
