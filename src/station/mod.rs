//! Station façade.
//!
//! A [`Station`] owns the cache store, the remote provider and the
//! configuration for one observation station. Values are read per key from
//! the cache (falling back to what this run wrote), and the day/night state
//! and icons are derived on every access from the cached coordinates and
//! the reference instant.

mod builder;
mod refresh;

pub use builder::StationBuilder;
pub use refresh::{GroupStatus, GroupValues, RefreshReport, observation_values};

use std::sync::Arc;

use chrono::{DateTime, Local, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;

use crate::cache::CacheStore;
use crate::providers::WeatherProvider;
use crate::sky::{self, DayPhase, Icon, SunEvents};
use crate::types::{CacheKey, CachedValue, Coordinates};

/// Names resolved by [`Station::value`] that are computed rather than cached.
pub const DERIVED_NAMES: &[&str] = &[
    "sunrise", "sunset", "isDay", "isNight", "isSunrise", "isSunset", "sunIcon", "icon",
];

/// Weather and sun state for one observation station.
pub struct Station {
    store: CacheStore,
    provider: Arc<dyn WeatherProvider>,
    cache_lifetime: u32,
    sun_buffer: TimeDelta,
    reference: DateTime<Utc>,
    station: String,
    unknown: String,
}

impl Station {
    pub fn builder() -> StationBuilder {
        StationBuilder::new()
    }

    /// Station code, e.g. `"KJAX"`.
    pub fn code(&self) -> &str {
        &self.station
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn WeatherProvider> {
        &self.provider
    }

    /// Marker rendered for unavailable values.
    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    /// Cache lifetime in minutes applied to every write.
    pub fn cache_lifetime(&self) -> u32 {
        self.cache_lifetime
    }

    /// Reference instant for day/night classification.
    pub fn now(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Pin the reference instant, or release it back to the wall clock.
    pub fn set_now(&mut self, now: Option<DateTime<Utc>>) {
        self.reference = now.unwrap_or_else(Utc::now);
    }

    // ========================================================================
    // Raw lookup
    // ========================================================================

    /// Current value for `key`: the fresh cache entry, else what this run
    /// wrote, else nothing.
    ///
    /// The station code is always known from configuration.
    pub fn lookup(&self, key: CacheKey) -> Option<CachedValue> {
        self.store
            .read(key)
            .or_else(|| self.store.mirrored(key))
            .or_else(|| {
                (key == CacheKey::Station).then(|| CachedValue::Text(self.station.clone()))
            })
    }

    /// Display string for `key`, rounded, with the unknown fallback.
    pub fn render(&self, key: CacheKey) -> String {
        match self.lookup(key) {
            Some(value) => value.render(&self.unknown),
            None => self.unknown.clone(),
        }
    }

    /// Display string for a persisted key or a derived name.
    ///
    /// `sunrise` and `sunset` render as RFC 3339 in the time zone of the
    /// calling process, not the station's; the offset is included, so the
    /// instant is exact either way. Unrecognised names render as the
    /// unknown marker.
    pub fn value(&self, name: &str) -> String {
        if let Ok(key) = name.parse::<CacheKey>() {
            return self.render(key);
        }
        self.derived(name).unwrap_or_else(|| self.unknown.clone())
    }

    fn derived(&self, name: &str) -> Option<String> {
        match name {
            "sunrise" => self.sunrise().map(render_time),
            "sunset" => self.sunset().map(render_time),
            "isDay" => self.is_day().map(render_flag),
            "isNight" => self.is_night().map(render_flag),
            "isSunrise" => self.is_sunrise().map(render_flag),
            "isSunset" => self.is_sunset().map(render_flag),
            "sunIcon" => self.sun_icon().map(|icon| icon.glyph().to_string()),
            "icon" => self.icon().map(|icon| icon.glyph().to_string()),
            _ => None,
        }
    }

    fn number(&self, key: CacheKey) -> Option<f64> {
        self.lookup(key).and_then(|v| v.as_number())
    }

    fn text(&self, key: CacheKey) -> Option<String> {
        self.lookup(key).and_then(|v| v.as_text().map(str::to_string))
    }

    // ========================================================================
    // Observation values
    // ========================================================================

    /// Observation time as reported by the station (ISO 8601).
    pub fn timestamp(&self) -> Option<String> {
        self.text(CacheKey::Timestamp)
    }

    /// Raw METAR report.
    pub fn raw(&self) -> Option<String> {
        self.text(CacheKey::Raw)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.lookup(CacheKey::Coordinates)
            .and_then(|v| v.as_coordinates())
            .filter(Coordinates::is_valid)
    }

    /// Station elevation in feet.
    pub fn elevation(&self) -> Option<f64> {
        self.number(CacheKey::Elevation)
    }

    /// Condition text, e.g. `"Mostly Cloudy"`.
    pub fn condition(&self) -> Option<String> {
        self.text(CacheKey::Text)
    }

    /// Temperature in °F.
    pub fn temperature(&self) -> Option<f64> {
        self.number(CacheKey::Temperature)
    }

    /// Dewpoint in °F.
    pub fn dewpoint(&self) -> Option<f64> {
        self.number(CacheKey::Dewpoint)
    }

    /// Wind direction in degrees.
    pub fn wind_direction(&self) -> Option<f64> {
        self.number(CacheKey::WindDirection)
    }

    /// Wind speed in mph.
    pub fn wind_speed(&self) -> Option<f64> {
        self.number(CacheKey::WindSpeed)
    }

    /// Barometric pressure in mmHg.
    pub fn pressure(&self) -> Option<f64> {
        self.number(CacheKey::Pressure)
    }

    /// Visibility in miles.
    pub fn visibility(&self) -> Option<f64> {
        self.number(CacheKey::Visibility)
    }

    /// Precipitation over the last hour in inches.
    pub fn precipitation(&self) -> Option<f64> {
        self.number(CacheKey::Precipitation)
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> Option<f64> {
        self.number(CacheKey::Humidity)
    }

    /// Heat index in °F.
    pub fn feels_like(&self) -> Option<f64> {
        self.number(CacheKey::FeelsLike)
    }

    /// Active alert event names. Empty when the last fetch found none.
    pub fn alerts(&self) -> Option<Vec<String>> {
        match self.lookup(CacheKey::Alerts)? {
            CachedValue::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Sun events for the station's solar day containing [`now`](Self::now).
    pub fn sun_events(&self) -> Option<SunEvents> {
        self.coordinates()
            .map(|at| sky::sun_events_at(self.reference, at))
    }

    pub fn day_phase(&self) -> Option<DayPhase> {
        self.sun_events()
            .map(|events| DayPhase::from_events(self.reference, &events, self.sun_buffer))
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sun_events()?.sunrise()
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sun_events()?.sunset()
    }

    pub fn is_day(&self) -> Option<bool> {
        self.day_phase().map(|p| p.is_day)
    }

    pub fn is_night(&self) -> Option<bool> {
        self.day_phase().map(|p| p.is_night)
    }

    pub fn is_sunrise(&self) -> Option<bool> {
        self.day_phase().map(|p| p.is_sunrise)
    }

    pub fn is_sunset(&self) -> Option<bool> {
        self.day_phase().map(|p| p.is_sunset)
    }

    pub fn sun_icon(&self) -> Option<Icon> {
        self.day_phase().as_ref().map(sky::sun_icon)
    }

    /// Weather icon from alerts and condition text, else the sun icon.
    pub fn icon(&self) -> Option<Icon> {
        let alerts = self.alerts().unwrap_or_default().join("\n");
        let condition = self.condition().unwrap_or_default();
        sky::condition_icon(&alerts, &condition, self.day_phase().as_ref())
    }

    /// Every value as displayed, for the aggregate record.
    pub fn snapshot(&self) -> Snapshot {
        let v = |name: &str| self.value(name);
        Snapshot {
            station: v("station"),
            timestamp: v("timestamp"),
            raw: v("raw"),
            coordinates: v("coordinates"),
            elevation: v("elevation"),
            text: v("text"),
            temperature: v("temperature"),
            dewpoint: v("dewpoint"),
            wind_direction: v("windDirection"),
            wind_speed: v("windSpeed"),
            pressure: v("pressure"),
            visibility: v("visibility"),
            precipitation: v("precipitation"),
            humidity: v("humidity"),
            feels_like: v("feelsLike"),
            alerts: v("alerts"),
            sunrise: v("sunrise"),
            sunset: v("sunset"),
            is_day: v("isDay"),
            is_night: v("isNight"),
            is_sunrise: v("isSunrise"),
            is_sunset: v("isSunset"),
            sun_icon: v("sunIcon"),
            icon: v("icon"),
        }
    }
}

fn render_flag(flag: bool) -> String {
    String::from(if flag { "1" } else { "0" })
}

fn render_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Every accessor value as rendered by [`Station::value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub station: String,
    pub timestamp: String,
    pub raw: String,
    pub coordinates: String,
    pub elevation: String,
    pub text: String,
    pub temperature: String,
    pub dewpoint: String,
    pub wind_direction: String,
    pub wind_speed: String,
    pub pressure: String,
    pub visibility: String,
    pub precipitation: String,
    pub humidity: String,
    pub feels_like: String,
    pub alerts: String,
    pub sunrise: String,
    pub sunset: String,
    pub is_day: String,
    pub is_night: String,
    pub is_sunrise: String,
    pub is_sunset: String,
    pub sun_icon: String,
    pub icon: String,
}
