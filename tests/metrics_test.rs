//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use stationwx::telemetry;
use stationwx::{Coordinates, Result, Station, StationObservation, WeatherError, WeatherProvider};

// ============================================================================
// Mock providers
// ============================================================================

struct MockProvider;

#[async_trait]
impl WeatherProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn latest_observation(&self, _station: &str) -> Result<StationObservation> {
        Ok(StationObservation {
            coordinates: Some(Coordinates::new(30.49, -81.69)),
            temperature_c: Some(25.0),
            ..Default::default()
        })
    }

    async fn active_alerts(&self, _point: Coordinates) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

struct FailingProvider;

#[async_trait]
impl WeatherProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn latest_observation(&self, _station: &str) -> Result<StationObservation> {
        Err(WeatherError::Api {
            status: 503,
            message: "unavailable".into(),
        })
    }

    async fn active_alerts(&self, _point: Coordinates) -> Result<Vec<String>> {
        Err(WeatherError::Http("unreachable".into()))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for `name` whose labels include `label = value`.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

fn station(dir: &std::path::Path, provider: Arc<dyn WeatherProvider>) -> Station {
    Station::builder()
        .cache_dir(dir)
        .provider(provider)
        .build()
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_refresh_records_fetch_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dir = tempfile::tempdir().unwrap();

    let report = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                station(dir.path(), Arc::new(MockProvider)).refresh().await
            })
        })
    });
    assert!(report.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::FETCHES_TOTAL), 2);
    assert_eq!(
        counter_with_label(&snapshot, telemetry::FETCHES_TOTAL, "status", "ok"),
        2
    );
    assert!(
        has_histogram(&snapshot, telemetry::FETCH_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_refresh_records_error_status() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dir = tempfile::tempdir().unwrap();

    let _report = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                station(dir.path(), Arc::new(FailingProvider)).refresh().await
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_with_label(&snapshot, telemetry::FETCHES_TOTAL, "status", "error"),
        2
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::FETCHES_TOTAL, "group", "observation"),
        1
    );
}

#[test]
fn cache_reads_record_hits_and_misses() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dir = tempfile::tempdir().unwrap();

    metrics::with_local_recorder(&recorder, || {
        let store = stationwx::cache::CacheStore::new(dir.path(), "t.");
        store
            .write(
                stationwx::CacheKey::Temperature,
                &stationwx::CachedValue::Number(72.0),
                5,
            )
            .unwrap();
        assert!(store.read(stationwx::CacheKey::Temperature).is_some());
        assert!(store.read(stationwx::CacheKey::Dewpoint).is_none());
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(
        counter_with_label(&snapshot, telemetry::CACHE_MISSES_TOTAL, "key", "dewpoint"),
        1
    );
}

#[test]
fn failed_writes_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    metrics::with_local_recorder(&recorder, || {
        let store = stationwx::cache::CacheStore::new(blocker.join("cache"), "t.");
        let result = store.write(
            stationwx::CacheKey::Text,
            &stationwx::CachedValue::Text("Fair".into()),
            5,
        );
        assert!(result.is_err());
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(&snapshot, telemetry::CACHE_WRITE_ERRORS_TOTAL),
        1
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let dir = tempfile::tempdir().unwrap();
    let report = station(dir.path(), Arc::new(MockProvider)).refresh().await;
    assert!(report.is_ok());
}
