//! Tests for [`CacheStore`], the per-key TTL file cache.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use stationwx::cache::CacheStore;
use stationwx::{CacheKey, CachedValue, Coordinates};

fn store(dir: &Path) -> CacheStore {
    CacheStore::new(dir, "stationwx.KJAX.")
}

/// Set the modification time of the entry under `name` to `age` ago.
fn backdate(store: &CacheStore, name: &str, age: Duration) {
    let file = File::options()
        .write(true)
        .open(store.path_for(name))
        .unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store.write_raw("raw", "KJAX 121756Z 00000KT 10SM CLR", 5).unwrap();
    assert_eq!(
        store.read_raw("raw").as_deref(),
        Some("KJAX 121756Z 00000KT 10SM CLR")
    );
}

#[test]
fn file_layout_is_header_then_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store.write_raw("temperature", "71.96", 5).unwrap();
    let contents = fs::read_to_string(dir.path().join("stationwx.KJAX.temperature")).unwrap();
    assert_eq!(contents, "expires:5\n71.96");
}

#[test]
fn missing_entry_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    assert!(store.read_raw("temperature").is_none());
    assert!(store.is_expired("temperature"));
    assert!(store.age("temperature").is_err());
}

#[test]
fn zero_ttl_is_always_expired() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store.write_raw("temperature", "72", 0).unwrap();
    assert!(store.is_expired("temperature"));
    assert!(store.read_raw("temperature").is_none());
}

#[test]
fn entry_expires_at_the_ttl_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    store.write_raw("humidity", "64", 5).unwrap();

    backdate(&store, "humidity", Duration::from_secs(4 * 60));
    assert!(!store.is_expired("humidity"));

    backdate(&store, "humidity", Duration::from_secs(5 * 60));
    assert!(store.is_expired("humidity"), "age == ttl must be expired");

    backdate(&store, "humidity", Duration::from_secs(6 * 60));
    assert!(store.is_expired("humidity"));
}

#[test]
fn future_mtime_counts_as_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    store.write_raw("text", "Fair", 5).unwrap();

    let file = File::options()
        .write(true)
        .open(store.path_for("text"))
        .unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(3600))
        .unwrap();

    assert_eq!(store.age("text").unwrap(), Duration::ZERO);
    assert_eq!(store.read_raw("text").as_deref(), Some("Fair"));
}

#[test]
fn malformed_entries_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    for (name, contents) in [
        ("single", "72"),
        ("noheader", "ttl:5\n72"),
        ("badminutes", "expires:five\n72"),
        ("empty", ""),
    ] {
        fs::write(store.path_for(name), contents).unwrap();
        assert!(store.read_raw(name).is_none(), "{name} should be a miss");
        assert!(store.is_expired(name));
    }
}

#[test]
fn multi_line_values_survive() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store
        .write(
            CacheKey::Alerts,
            &CachedValue::Lines(vec!["Heat Advisory".into(), "Rip Current Statement".into()]),
            5,
        )
        .unwrap();
    assert_eq!(
        store.read(CacheKey::Alerts),
        Some(CachedValue::Lines(vec![
            "Heat Advisory".into(),
            "Rip Current Statement".into()
        ]))
    );
}

#[test]
fn typed_read_rejects_values_of_the_wrong_kind() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store.write_raw("temperature", "NaN", 5).unwrap();
    assert_eq!(store.read(CacheKey::Temperature), None);

    store.write_raw("coordinates", "north", 5).unwrap();
    assert_eq!(store.read(CacheKey::Coordinates), None);
}

#[test]
fn out_of_range_coordinates_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    for raw in ["30.0,1e300", "200.0,-81.0", "30.49,-181.0"] {
        store.write_raw("coordinates", raw, 5).unwrap();
        assert_eq!(store.read(CacheKey::Coordinates), None, "{raw}");
    }
}

#[test]
fn typed_write_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    let values = [
        (CacheKey::Temperature, CachedValue::Number(71.96)),
        (CacheKey::Text, CachedValue::Text("Mostly Cloudy".into())),
        (
            CacheKey::Coordinates,
            CachedValue::Coordinates(Coordinates::new(30.49, -81.69)),
        ),
        (CacheKey::FeelsLike, CachedValue::Missing),
        (CacheKey::Alerts, CachedValue::Lines(Vec::new())),
    ];
    for (key, value) in values {
        store.write(key, &value, 5).unwrap();
        assert_eq!(store.read(key), Some(value), "{key}");
    }
}

#[test]
fn expired_values_remain_in_the_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store
        .write(CacheKey::Temperature, &CachedValue::Number(72.0), 0)
        .unwrap();
    assert_eq!(store.read(CacheKey::Temperature), None);
    assert_eq!(
        store.mirrored(CacheKey::Temperature),
        Some(CachedValue::Number(72.0))
    );
}

#[test]
fn unwritable_dir_surfaces_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let store = CacheStore::new(blocker.join("cache"), "t.");

    let err = store
        .write(CacheKey::Temperature, &CachedValue::Number(72.0), 5)
        .unwrap_err();
    assert!(err.is_cache_write());
    // What this run fetched is still visible.
    assert_eq!(
        store.mirrored(CacheKey::Temperature),
        Some(CachedValue::Number(72.0))
    );
}

#[test]
fn prefixes_isolate_stations() {
    let dir = tempfile::tempdir().unwrap();
    let jax = CacheStore::new(dir.path(), "stationwx.KJAX.");
    let sav = CacheStore::new(dir.path(), "stationwx.KSAV.");

    jax.write_raw("temperature", "72", 5).unwrap();
    sav.write_raw("temperature", "65", 5).unwrap();

    assert_eq!(jax.read_raw("temperature").as_deref(), Some("72"));
    assert_eq!(sav.read_raw("temperature").as_deref(), Some("65"));
}

#[test]
fn overwrite_replaces_value_and_ttl() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    store.write_raw("text", "Fair", 0).unwrap();
    store.write_raw("text", "Light Rain", 5).unwrap();
    assert_eq!(store.read_raw("text").as_deref(), Some("Light Rain"));
}

#[test]
fn any_expired_checks_every_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let keys = [CacheKey::Temperature, CacheKey::Dewpoint];

    store.write_raw("temperature", "72", 5).unwrap();
    assert!(store.any_expired(&keys));

    store.write_raw("dewpoint", "65", 5).unwrap();
    assert!(!store.any_expired(&keys));
}
