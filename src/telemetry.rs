//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `stationwx_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `key`: cache key wire name (e.g. "temperature", "alerts")
//! - `group`: refresh group: "observation" or "alerts"
//! - `status`: outcome: "ok" or "error"

/// Total fresh cache reads.
///
/// Labels: `key`.
pub const CACHE_HITS_TOTAL: &str = "stationwx_cache_hits_total";

/// Total reads that found no fresh entry (absent, malformed or expired).
///
/// Labels: `key`.
pub const CACHE_MISSES_TOTAL: &str = "stationwx_cache_misses_total";

/// Total cache writes that failed to persist.
///
/// Labels: `key`.
pub const CACHE_WRITE_ERRORS_TOTAL: &str = "stationwx_cache_write_errors_total";

/// Total remote fetches issued by the refresh orchestrator.
///
/// Labels: `group`, `status` ("ok" | "error").
pub const FETCHES_TOTAL: &str = "stationwx_fetches_total";

/// Remote fetch duration in seconds.
///
/// Labels: `group`.
pub const FETCH_DURATION_SECONDS: &str = "stationwx_fetch_duration_seconds";
