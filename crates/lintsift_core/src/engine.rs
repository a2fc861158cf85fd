//! The caching filter-tree engine.
//!
//! Walks an input tree, routes files the node claims through the persistent
//! cache, and mirrors everything into an output tree: claimed files carry
//! the node's target extension and fresh `process_one` output (or the
//! cached blob), unclaimed files are copied through untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use lintsift_cache::CacheStore;

use crate::error::FilterError;
use crate::processor::FilterNode;

/// Outcome counts for one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSummary {
    /// Claimed files processed fresh.
    pub processed: usize,
    /// Claimed files served from the cache.
    pub from_cache: usize,
    /// Unclaimed files copied through.
    pub copied: usize,
}

/// Drives a [`FilterNode`] over a file tree with a persistent result cache.
pub struct CachingFilterEngine {
    input_dir: PathBuf,
    output_dir: PathBuf,
    store: Mutex<CacheStore>,
}

impl CachingFilterEngine {
    /// Creates an engine reading from `input_dir` and emitting into
    /// `output_dir`, with cached results under `cache_dir`.
    ///
    /// With `persist: false` the store is disabled: every file is processed
    /// fresh and nothing is written to the cache directory.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
        persist: bool,
    ) -> Self {
        let mut store = CacheStore::new(cache_dir);
        if !persist {
            store.disable();
        }
        if let Err(e) = store.load() {
            warn!("Failed to load cache: {}", e);
        }

        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            store: Mutex::new(store),
        }
    }

    /// Runs `node` over the input tree.
    ///
    /// Per claimed file: cache hit emits the stored blob; miss calls
    /// `process_one`, emits its output, and stores it. The index is saved
    /// once at the end of the run.
    pub fn run(&self, node: &dyn FilterNode) -> Result<EngineSummary, FilterError> {
        let extensions = node.extensions();
        let target_extension = node.target_extension();
        let mut summary = EngineSummary::default();

        for entry in WalkDir::new(&self.input_dir) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let rel = path.strip_prefix(&self.input_dir).map_err(|_| {
                FilterError::internal(format!("Walked outside input tree: {}", path.display()))
            })?;
            let rel_str = rel.to_string_lossy();

            let claimed = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|claimed| claimed == ext));

            if !claimed {
                let out_path = self.output_dir.join(rel);
                ensure_parent(&out_path)?;
                fs::copy(path, &out_path)?;
                summary.copied += 1;
                continue;
            }

            let out_path = self.output_dir.join(rel).with_extension(&target_extension);
            ensure_parent(&out_path)?;

            let content = fs::read_to_string(path)?;
            let key = node.cache_key_extra(&content, rel_str.as_ref());

            let cached = {
                let store = self
                    .store
                    .lock()
                    .map_err(|_| FilterError::internal("Cache mutex poisoned"))?;
                store.read(&key)?
            };

            if let Some(output) = cached {
                debug!("Cache hit for {}", rel_str);
                fs::write(&out_path, output)?;
                summary.from_cache += 1;
                continue;
            }

            debug!("Processing {}", rel_str);
            let output = node.process_one(&content, rel_str.as_ref())?;
            fs::write(&out_path, &output)?;

            {
                let mut store = self
                    .store
                    .lock()
                    .map_err(|_| FilterError::internal("Cache mutex poisoned"))?;
                store.store(&key, &output)?;
            }
            summary.processed += 1;
        }

        {
            let store = self
                .store
                .lock()
                .map_err(|_| FilterError::internal("Cache mutex poisoned"))?;
            store.save()?;
        }

        info!(
            "Filtered {} files ({} fresh, {} from cache, {} copied through)",
            summary.processed + summary.from_cache + summary.copied,
            summary.processed,
            summary.from_cache,
            summary.copied
        );

        Ok(summary)
    }
}

fn ensure_parent(path: &Path) -> Result<(), FilterError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
