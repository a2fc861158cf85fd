//! Cache entry types.

use serde::{Deserialize, Serialize};

/// A cache entry for one processed file.
///
/// The entry records where the stored output blob lives relative to the
/// cache directory; the key it is filed under already encodes everything
/// that makes the output valid (node fingerprint + content key), so an
/// entry never needs revalidation beyond the blob still being present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// File name of the stored output blob, relative to the blob directory.
    pub blob: String,

    /// Size of the stored output in bytes.
    pub size: u64,

    /// Timestamp when this entry was created.
    pub created_at: u64,
}

impl CacheEntry {
    /// Creates a new cache entry.
    pub fn new(blob: String, size: u64) -> Self {
        Self {
            blob,
            size,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}
