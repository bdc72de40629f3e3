//! Group refresh orchestration.
//!
//! A group is refreshed when any of its keys lacks a fresh cache entry.
//! One remote call then rewrites every key of the group with the same TTL,
//! writing [`CachedValue::Missing`] for fields the response lacked, so the
//! group never mixes fresh and stale entries.
//!
//! Groups are refreshed one after the other. Alerts are looked up at the
//! station's coordinates, so they run after the observation group; if no
//! coordinates are known the alerts refresh fails on its own without
//! touching the observation values.

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::Station;
use crate::convert;
use crate::telemetry;
use crate::types::{CacheKey, CachedValue, Coordinates, Group, StationObservation};
use crate::{Result, WeatherError};

/// Values produced by one remote call, keyed by the cache key they fill.
pub type GroupValues = HashMap<CacheKey, CachedValue>;

/// What a group refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// Every key was fresh; nothing was fetched.
    Fresh,
    /// The group was fetched and rewritten.
    Refreshed,
}

/// Outcome of [`Station::refresh`], one entry per group.
#[derive(Debug)]
pub struct RefreshReport {
    pub observation: Result<GroupStatus>,
    pub alerts: Result<GroupStatus>,
}

impl RefreshReport {
    /// Whether every group is fresh or was refreshed.
    pub fn is_ok(&self) -> bool {
        self.observation.is_ok() && self.alerts.is_ok()
    }

    /// Failed groups with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (Group, &WeatherError)> {
        [
            (Group::Observation, &self.observation),
            (Group::Alerts, &self.alerts),
        ]
        .into_iter()
        .filter_map(|(group, outcome)| outcome.as_ref().err().map(|e| (group, e)))
    }

    /// First failure to persist refreshed values, if any.
    ///
    /// Unlike fetch failures, these mean the cache no longer reflects what
    /// this run believes it stored.
    pub fn cache_write_failure(&self) -> Option<&WeatherError> {
        self.errors()
            .map(|(_, e)| e)
            .find(|e| e.is_cache_write())
    }
}

impl Station {
    /// Refresh every group whose cache is stale.
    ///
    /// Never fails as a whole; inspect the report for per-group errors.
    pub async fn refresh(&self) -> RefreshReport {
        let observation = self.refresh_observation().await;
        let alerts = self.refresh_alerts().await;
        RefreshReport {
            observation,
            alerts,
        }
    }

    /// Refresh the station observation group if stale.
    pub async fn refresh_observation(&self) -> Result<GroupStatus> {
        self.refresh_group(Group::Observation, || async {
            let observation = self.provider.latest_observation(&self.station).await?;
            Ok::<_, WeatherError>(observation_values(&self.station, &observation))
        })
        .await
    }

    /// Refresh the active alerts group if stale.
    pub async fn refresh_alerts(&self) -> Result<GroupStatus> {
        self.refresh_group(Group::Alerts, || async {
            let point = self
                .coordinates()
                .ok_or(WeatherError::MissingField("coordinates"))?;
            let events = self.provider.active_alerts(point).await?;
            Ok::<_, WeatherError>(GroupValues::from([(
                CacheKey::Alerts,
                CachedValue::Lines(events),
            )]))
        })
        .await
    }

    /// Fetch and rewrite `group` if any of its keys is stale.
    ///
    /// A fetch error leaves the cache untouched. A write error stops the
    /// rewrite and is returned; keys written before it keep their new value.
    pub async fn refresh_group<F, Fut>(&self, group: Group, fetch: F) -> Result<GroupStatus>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<GroupValues>>,
    {
        let keys = group.keys();
        if !self.store.any_expired(keys) {
            debug!(group = group.as_str(), "cache fresh, skipping fetch");
            return Ok(GroupStatus::Fresh);
        }

        let start = Instant::now();
        let fetched = fetch().await;
        record_fetch(group, start, fetched.is_ok());

        let mut values = match fetched {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    group = group.as_str(),
                    provider = self.provider.name(),
                    error = %e,
                    "fetch failed"
                );
                return Err(e);
            }
        };

        for key in keys {
            let value = values.remove(key).unwrap_or(CachedValue::Missing);
            self.store.write(*key, &value, self.cache_lifetime)?;
        }

        info!(
            group = group.as_str(),
            keys = keys.len(),
            ttl_minutes = self.cache_lifetime,
            "group refreshed"
        );
        Ok(GroupStatus::Refreshed)
    }
}

fn record_fetch(group: Group, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::FETCHES_TOTAL,
        "group" => group.as_str(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::FETCH_DURATION_SECONDS, "group" => group.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Convert an SI observation into display-unit cache values.
///
/// Every observation-group key is present in the result; fields the station
/// did not report map to [`CachedValue::Missing`].
pub fn observation_values(station: &str, obs: &StationObservation) -> GroupValues {
    fn num(v: Option<f64>, convert: fn(f64) -> f64) -> CachedValue {
        CachedValue::number(v.map(convert))
    }

    GroupValues::from([
        (CacheKey::Station, CachedValue::text(Some(station))),
        (CacheKey::Timestamp, CachedValue::text(obs.timestamp.as_deref())),
        (CacheKey::Raw, CachedValue::text(obs.raw_message.as_deref())),
        (
            CacheKey::Coordinates,
            obs.coordinates
                .filter(Coordinates::is_valid)
                .map_or(CachedValue::Missing, CachedValue::Coordinates),
        ),
        (CacheKey::Elevation, num(obs.elevation_m, convert::meters_to_feet)),
        (CacheKey::Text, CachedValue::text(obs.text_description.as_deref())),
        (
            CacheKey::Temperature,
            num(obs.temperature_c, convert::celsius_to_fahrenheit),
        ),
        (
            CacheKey::Dewpoint,
            num(obs.dewpoint_c, convert::celsius_to_fahrenheit),
        ),
        (CacheKey::WindDirection, CachedValue::number(obs.wind_direction_deg)),
        (CacheKey::WindSpeed, num(obs.wind_speed_mps, convert::mps_to_mph)),
        (CacheKey::Pressure, num(obs.pressure_pa, convert::pascals_to_mmhg)),
        (CacheKey::Visibility, num(obs.visibility_m, convert::meters_to_miles)),
        (
            CacheKey::Precipitation,
            num(obs.precipitation_last_hour_m, convert::meters_to_inches),
        ),
        (CacheKey::Humidity, CachedValue::number(obs.relative_humidity_pct)),
        (
            CacheKey::FeelsLike,
            num(obs.heat_index_c, convert::celsius_to_fahrenheit),
        ),
    ])
}
