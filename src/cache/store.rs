//! File-backed per-key TTL store.
//!
//! One file per key at `<dir>/<prefix><key>`. Reads never fail: a missing,
//! unreadable, malformed or expired file is a miss. Writes do fail, and the
//! error must reach the refresh orchestrator.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use super::ValueMirror;
use super::entry::CacheEntry;
use crate::telemetry;
use crate::types::{CacheKey, CachedValue};
use crate::{Result, WeatherError};

/// Per-key TTL cache persisted as one small file per key.
pub struct CacheStore {
    dir: PathBuf,
    prefix: String,
    mirror: ValueMirror,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            mirror: ValueMirror::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Deterministic file path for a key name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{name}", self.prefix))
    }

    // ========================================================================
    // Raw string interface
    // ========================================================================

    /// Fresh value stored under `name`, or `None`.
    pub fn read_raw(&self, name: &str) -> Option<String> {
        self.fresh_entry(name).map(|entry| entry.value)
    }

    /// Persist `value` under `name`, replacing any previous entry.
    ///
    /// Written to a sibling temp file and renamed into place, so a reader
    /// never sees a half-written entry under the final name.
    pub fn write_raw(&self, name: &str, value: &str, ttl_minutes: u32) -> Result<()> {
        let path = self.path_for(name);
        let write_err = |path: &Path, source| WeatherError::CacheWrite {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|e| write_err(&self.dir, e))?;

        let tmp_path = path.with_file_name(format!("{}{name}.tmp", self.prefix));
        fs::write(&tmp_path, CacheEntry::new(value, ttl_minutes).encode())
            .map_err(|e| write_err(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            write_err(&path, e)
        })?;

        debug!(key = name, ttl_minutes, path = %path.display(), "cache entry written");
        Ok(())
    }

    /// Time since the entry under `name` was last written.
    ///
    /// The entry must exist. A modification time in the future (clock
    /// adjustment) counts as zero age.
    pub fn age(&self, name: &str) -> Result<Duration> {
        let path = self.path_for(name);
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|source| WeatherError::CacheRead {
                path: path.clone(),
                source,
            })?;
        Ok(SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO))
    }

    /// Whether `name` has no fresh entry.
    pub fn is_expired(&self, name: &str) -> bool {
        self.fresh_entry(name).is_none()
    }

    /// Whether any of `keys` has no fresh entry.
    pub fn any_expired(&self, keys: &[CacheKey]) -> bool {
        keys.iter().any(|key| self.is_expired(key.as_str()))
    }

    fn fresh_entry(&self, name: &str) -> Option<CacheEntry> {
        let path = self.path_for(name);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key = name, path = %path.display(), error = %e, "failed to read cache entry");
                return None;
            }
        };

        let Some(entry) = CacheEntry::parse(&contents) else {
            warn!(key = name, path = %path.display(), "malformed cache entry");
            return None;
        };

        let age = match self.age(name) {
            Ok(age) => age,
            Err(e) => {
                warn!(key = name, error = %e, "failed to stat cache entry");
                return None;
            }
        };

        if entry.is_expired(age) {
            debug!(
                key = name,
                age_secs = age.as_secs(),
                ttl_minutes = entry.ttl_minutes,
                "cache entry expired"
            );
            return None;
        }
        Some(entry)
    }

    // ========================================================================
    // Typed interface
    // ========================================================================

    /// Fresh, well-formed value for `key`.
    ///
    /// A payload that does not decode as the key's kind is a miss.
    pub fn read(&self, key: CacheKey) -> Option<CachedValue> {
        let value = self.read_raw(key.as_str()).and_then(|raw| {
            let decoded = CachedValue::decode(key.kind(), &raw);
            if decoded.is_none() {
                warn!(key = key.as_str(), payload = %raw, "cache payload does not match key type");
            }
            decoded
        });

        if value.is_some() {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "key" => key.as_str()).increment(1);
        } else {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "key" => key.as_str()).increment(1);
        }
        value
    }

    /// Record `value` in the in-process mirror and persist it.
    ///
    /// The mirror is updated even when persisting fails so this run can
    /// still display what it fetched; the error is returned regardless.
    pub fn write(&self, key: CacheKey, value: &CachedValue, ttl_minutes: u32) -> Result<()> {
        self.mirror.insert(key, value.clone());
        self.write_raw(key.as_str(), &value.encode(), ttl_minutes)
            .inspect_err(|e| {
                metrics::counter!(telemetry::CACHE_WRITE_ERRORS_TOTAL, "key" => key.as_str())
                    .increment(1);
                warn!(key = key.as_str(), error = %e, "cache write failed");
            })
    }

    /// Value written for `key` during this process run, fresh or not.
    pub fn mirrored(&self, key: CacheKey) -> Option<CachedValue> {
        self.mirror.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_dir_prefix_and_key() {
        let store = CacheStore::new("/var/cache/wx", "stationwx.KJAX.");
        assert_eq!(
            store.path_for("temperature"),
            PathBuf::from("/var/cache/wx/stationwx.KJAX.temperature")
        );
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path(), "t.");
        store.write_raw("raw", "KJAX 121756Z", 5).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["t.raw"]);
    }

    #[test]
    fn write_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("deep").join("nested"), "t.");
        store.write_raw("text", "Fair", 5).unwrap();
        assert_eq!(store.read_raw("text").as_deref(), Some("Fair"));
    }

    #[test]
    fn mirror_survives_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path(), "t.");
        store
            .write(CacheKey::Temperature, &CachedValue::Number(70.2), 0)
            .unwrap();

        assert_eq!(store.read(CacheKey::Temperature), None);
        assert_eq!(
            store.mirrored(CacheKey::Temperature),
            Some(CachedValue::Number(70.2))
        );
    }
}
