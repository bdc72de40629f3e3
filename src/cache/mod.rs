//! Caching subsystem.
//!
//! Two layers:
//!
//! - [`CacheStore`]: durable per-key TTL cache, one file per key under the
//!   configured directory. Freshness is judged per key from the file's
//!   modification time and the TTL recorded in its header. See [`entry`]
//!   for the file format.
//!
//! - [`ValueMirror`]: in-process copy of every value written during this
//!   run. Consulted when the durable entry is no longer fresh (e.g. a TTL
//!   of zero, or a write that landed within the filesystem's timestamp
//!   resolution of the read).

pub mod entry;
pub mod store;

pub use entry::CacheEntry;
pub use store::CacheStore;

use crate::types::{CacheKey, CachedValue};

/// Capacity of the mirror; comfortably above the number of persisted keys.
const MIRROR_MAX_ENTRIES: u64 = 64;

/// In-process mirror of values written this run.
///
/// Keyed on [`CacheKey`]. Entries never expire; they live as long as the
/// owning [`CacheStore`].
pub struct ValueMirror {
    entries: moka::sync::Cache<CacheKey, CachedValue>,
}

impl ValueMirror {
    pub fn new() -> Self {
        Self {
            entries: moka::sync::Cache::new(MIRROR_MAX_ENTRIES),
        }
    }

    pub fn get(&self, key: CacheKey) -> Option<CachedValue> {
        self.entries.get(&key)
    }

    /// Insert (or overwrite) the value for `key`.
    pub fn insert(&self, key: CacheKey, value: CachedValue) {
        self.entries.insert(key, value);
    }
}

impl Default for ValueMirror {
    fn default() -> Self {
        Self::new()
    }
}
