//! # lintsift_core
//!
//! Caching lint filter node for file-tree build pipelines.
//!
//! A [`LintFilter`] claims files by extension, runs a [`Lint`] engine over
//! each one, reports diagnostics, and passes the original content through
//! unchanged: a report-only pipeline stage, not a transform. Results are
//! reused across runs via a cache key that prefixes the node's configuration
//! fingerprint onto a content-derived key, so a rule, ignore, or option
//! change invalidates every cached entry.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintsift_core::{CachingFilterEngine, FilterOptions, LintFilter};
//!
//! let node = LintFilter::new(linter, FilterOptions::new())?;
//! let engine = CachingFilterEngine::new("src", "out", ".lintsift-cache", true);
//!
//! let summary = engine.run(&node)?;
//! println!("{} fresh, {} from cache", summary.processed, summary.from_cache);
//! ```

mod config;
mod diagnostic;
mod engine;
mod error;
mod fingerprint;
mod ignore_file;
mod linter;
mod options;
mod processor;
pub mod reporter;

pub use config::RuleConfig;
pub use diagnostic::{Diagnostic, Level};
pub use engine::{CachingFilterEngine, EngineSummary};
pub use error::FilterError;
pub use fingerprint::canonical_json;
pub use ignore_file::IgnoreRules;
pub use linter::{Lint, LintFailure, SourceLocation};
pub use options::{DEFAULT_CONFIG_PATH, DEFAULT_IGNORE_PATH, FilterOptions};
pub use processor::{FilterNode, LintFilter};
pub use reporter::{Formatter, Report, Stylish};

#[cfg(test)]
pub mod test_utils;
