//! # lintsift_cache
//!
//! Persistent result cache for lintsift filter nodes.
//!
//! The store maps a full cache key (the node's fingerprint concatenated with
//! a content-derived key) to a blob of previously produced output. An
//! in-memory index is loaded from and saved to a JSON file in the cache
//! directory, so results survive across process invocations.

mod entry;
mod store;

pub use entry::CacheEntry;
pub use store::CacheStore;

use thiserror::Error;

/// Errors raised by the cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error while reading or writing cache files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk index could not be understood.
    #[error("Corrupted cache index: {0}")]
    Corrupted(String),

    /// The index could not be serialized.
    #[error("Cache serialization failed: {0}")]
    Serialization(String),
}

impl CacheError {
    /// Creates a corrupted-index error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
