//! Persistent cache store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{CacheEntry, CacheError};

const INDEX_FILE: &str = "index.json";
const BLOB_DIR: &str = "blobs";

/// Stores processed output keyed by the full cache key.
///
/// A key is expected to be `<node fingerprint><content key>`; the store does
/// not interpret it beyond using it as a file name for the output blob.
pub struct CacheStore {
    /// Directory where the index and blobs are stored.
    cache_dir: PathBuf,
    /// In-memory index.
    entries: HashMap<String, CacheEntry>,
    /// Whether the store is enabled.
    enabled: bool,
}

impl CacheStore {
    /// Creates a new cache store rooted at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Disables the store. Lookups miss, inserts and saves become no-ops.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Enables the store.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Returns whether the store is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Computes the content-derived part of a cache key.
    ///
    /// Both the file content and its relative path feed the digest, so a
    /// file moved within the tree is keyed separately from its copy.
    pub fn content_key(content: &str, relative_path: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content.as_bytes());
        hasher.update(relative_path.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Gets the entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        self.entries.get(key)
    }

    /// Returns whether `key` has a usable entry: present in the index and
    /// its blob still on disk.
    pub fn is_valid(&self, key: &str) -> bool {
        match self.get(key) {
            Some(entry) => self.blob_path(&entry.blob).is_file(),
            None => false,
        }
    }

    /// Stores `output` under `key`, writing the blob and updating the index.
    pub fn store(&mut self, key: &str, output: &str) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let blob_dir = self.cache_dir.join(BLOB_DIR);
        fs::create_dir_all(&blob_dir)?;
        fs::write(blob_dir.join(key), output)?;

        self.entries.insert(
            key.to_string(),
            CacheEntry::new(key.to_string(), output.len() as u64),
        );
        Ok(())
    }

    /// Reads the stored output for `key`, or `None` when the key misses.
    pub fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        let Some(entry) = self.get(key) else {
            return Ok(None);
        };

        let path = self.blob_path(&entry.blob);
        if !path.is_file() {
            debug!("Blob missing for cached key {}", key);
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(path)?))
    }

    /// Removes the entry stored under `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Loads the index from disk. A missing index is an empty store.
    pub fn load(&mut self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let index = self.cache_dir.join(INDEX_FILE);
        if !index.exists() {
            debug!("No cache index found at {}", index.display());
            return Ok(());
        }

        let content = fs::read_to_string(&index)?;
        let entries: HashMap<String, CacheEntry> =
            serde_json::from_str(&content).map_err(|e| CacheError::corrupted(e.to_string()))?;

        info!("Loaded {} cache entries", entries.len());
        self.entries = entries;

        Ok(())
    }

    /// Saves the index to disk.
    pub fn save(&self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        fs::create_dir_all(&self.cache_dir)?;

        let json = serde_json::to_string(&self.entries)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        fs::write(self.cache_dir.join(INDEX_FILE), json)?;

        info!(
            "Saved {} cache entries to {}",
            self.entries.len(),
            self.cache_dir.display()
        );

        Ok(())
    }

    /// Returns the number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn blob_path(&self, blob: &str) -> PathBuf {
        self.cache_dir.join(BLOB_DIR).join(blob)
    }

    /// The directory this store is rooted at.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
