//! Ignore-rule loading and path filtering.

use std::fmt;
use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

use crate::error::FilterError;

/// Compiled ignore rules plus the raw pattern text they came from.
///
/// The rules are rooted one directory above the linted tree, so a candidate
/// path is matched as `../<relative-path>`. The raw source text is retained
/// because it feeds the node fingerprint.
pub struct IgnoreRules {
    matcher: Gitignore,
    source: String,
}

impl IgnoreRules {
    /// Compiles gitignore-style pattern text.
    pub fn from_patterns(text: impl Into<String>) -> Result<Self, FilterError> {
        let source = text.into();

        let mut builder = GitignoreBuilder::new("..");
        for line in source.lines() {
            builder.add_line(None, line)?;
        }
        let matcher = builder.build()?;

        Ok(Self { matcher, source })
    }

    /// Loads ignore rules from `path`.
    ///
    /// Same presence policy as rule configs: a missing file at the
    /// conventional `default_path` means no filtering (`Ok(None)`, every
    /// file is linted); a missing file at an explicit path is an error.
    pub fn load(path: &Path, default_path: &Path) -> Result<Option<Self>, FilterError> {
        if !path.exists() {
            if path == default_path {
                debug!("No ignore file at default path {}", path.display());
                return Ok(None);
            }
            return Err(FilterError::IgnoreFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        Self::from_patterns(text).map(Some)
    }

    /// Returns whether `relative_path` should be linted.
    ///
    /// Parent directories are consulted too, so a `build/` rule exempts
    /// every file beneath `build`.
    pub fn should_lint(&self, relative_path: &str) -> bool {
        let rooted = format!("../{relative_path}");
        !self
            .matcher
            .matched_path_or_any_parents(Path::new(&rooted), false)
            .is_ignore()
    }

    /// The raw pattern text the rules were compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for IgnoreRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreRules")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
