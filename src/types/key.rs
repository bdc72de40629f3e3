//! Persisted key schema.
//!
//! Every value stationwx caches on disk is named by a [`CacheKey`]. Each key
//! declares the [`ValueKind`] its payload must decode as, and belongs to
//! exactly one [`Group`], the set of keys one remote call populates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::WeatherError;

/// The shape a cached payload must decode as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text, rendered verbatim.
    Text,
    /// A finite number, rendered rounded to an integer.
    Number,
    /// A `lat,lon` pair.
    Coordinates,
    /// Newline-separated list; may be empty.
    Lines,
}

/// A persisted data key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheKey {
    Station,
    Timestamp,
    Raw,
    Coordinates,
    Elevation,
    Text,
    Temperature,
    Dewpoint,
    WindDirection,
    WindSpeed,
    Pressure,
    Visibility,
    Precipitation,
    Humidity,
    FeelsLike,
    Alerts,
}

impl CacheKey {
    /// Every persisted key, in display order.
    pub const ALL: [CacheKey; 16] = [
        CacheKey::Station,
        CacheKey::Timestamp,
        CacheKey::Raw,
        CacheKey::Coordinates,
        CacheKey::Elevation,
        CacheKey::Text,
        CacheKey::Temperature,
        CacheKey::Dewpoint,
        CacheKey::WindDirection,
        CacheKey::WindSpeed,
        CacheKey::Pressure,
        CacheKey::Visibility,
        CacheKey::Precipitation,
        CacheKey::Humidity,
        CacheKey::FeelsLike,
        CacheKey::Alerts,
    ];

    /// Wire name, also used as the cache file suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Station => "station",
            CacheKey::Timestamp => "timestamp",
            CacheKey::Raw => "raw",
            CacheKey::Coordinates => "coordinates",
            CacheKey::Elevation => "elevation",
            CacheKey::Text => "text",
            CacheKey::Temperature => "temperature",
            CacheKey::Dewpoint => "dewpoint",
            CacheKey::WindDirection => "windDirection",
            CacheKey::WindSpeed => "windSpeed",
            CacheKey::Pressure => "pressure",
            CacheKey::Visibility => "visibility",
            CacheKey::Precipitation => "precipitation",
            CacheKey::Humidity => "humidity",
            CacheKey::FeelsLike => "feelsLike",
            CacheKey::Alerts => "alerts",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            CacheKey::Station | CacheKey::Timestamp | CacheKey::Raw | CacheKey::Text => {
                ValueKind::Text
            }
            CacheKey::Coordinates => ValueKind::Coordinates,
            CacheKey::Alerts => ValueKind::Lines,
            CacheKey::Elevation
            | CacheKey::Temperature
            | CacheKey::Dewpoint
            | CacheKey::WindDirection
            | CacheKey::WindSpeed
            | CacheKey::Pressure
            | CacheKey::Visibility
            | CacheKey::Precipitation
            | CacheKey::Humidity
            | CacheKey::FeelsLike => ValueKind::Number,
        }
    }

    pub fn group(&self) -> Group {
        match self {
            CacheKey::Alerts => Group::Alerts,
            _ => Group::Observation,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKey {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheKey::ALL
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| WeatherError::UnknownKey(s.to_string()))
    }
}

/// Keys refreshed together by a single remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Latest station observation.
    Observation,
    /// Active alerts at the station's coordinates.
    Alerts,
}

const OBSERVATION_KEYS: [CacheKey; 15] = [
    CacheKey::Station,
    CacheKey::Timestamp,
    CacheKey::Raw,
    CacheKey::Coordinates,
    CacheKey::Elevation,
    CacheKey::Text,
    CacheKey::Temperature,
    CacheKey::Dewpoint,
    CacheKey::WindDirection,
    CacheKey::WindSpeed,
    CacheKey::Pressure,
    CacheKey::Visibility,
    CacheKey::Precipitation,
    CacheKey::Humidity,
    CacheKey::FeelsLike,
];

const ALERT_KEYS: [CacheKey; 1] = [CacheKey::Alerts];

impl Group {
    pub fn keys(&self) -> &'static [CacheKey] {
        match self {
            Group::Observation => &OBSERVATION_KEYS,
            Group::Alerts => &ALERT_KEYS,
        }
    }

    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Observation => "observation",
            Group::Alerts => "alerts",
        }
    }
}
