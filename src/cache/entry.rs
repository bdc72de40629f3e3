//! On-disk entry format.
//!
//! ```text
//! expires:<minutes>
//! <value...>
//! ```
//!
//! The value is everything after the first newline, so multi-line payloads
//! (newline-joined alerts) round-trip. The write time is not stored; it is
//! the file's modification time.

use std::time::Duration;

const HEADER_PREFIX: &str = "expires:";

/// A parsed cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Validity window, fixed at write time. Zero disables caching.
    pub ttl_minutes: u32,
    pub value: String,
}

impl CacheEntry {
    pub fn new(value: impl Into<String>, ttl_minutes: u32) -> Self {
        Self {
            ttl_minutes,
            value: value.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{HEADER_PREFIX}{}\n{}", self.ttl_minutes, self.value)
    }

    /// Parse file contents. Anything other than a valid header line followed
    /// by a value is malformed and yields `None`.
    pub fn parse(contents: &str) -> Option<Self> {
        let (header, value) = contents.split_once('\n')?;
        let minutes = header.trim_end_matches('\r').strip_prefix(HEADER_PREFIX)?;
        let ttl_minutes = minutes.trim().parse().ok()?;
        Some(Self::new(value, ttl_minutes))
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl_minutes) * 60)
    }

    /// An entry is expired once its age reaches the TTL; the boundary itself
    /// counts as expired.
    pub fn is_expired(&self, age: Duration) -> bool {
        age >= self.ttl()
    }
}
