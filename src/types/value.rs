//! Typed cache payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::ValueKind;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie on the globe: latitude in [-90, 90],
    /// longitude in [-180, 180]. NaN fails both ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Build from a GeoJSON position, which is `[lon, lat]`.
    pub fn from_geojson(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lat, *lon)).filter(Self::is_valid),
            _ => None,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        Some(Self::new(lat, lon)).filter(Self::is_valid)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A decoded cache payload.
///
/// `Missing` is what a refresh writes for a field the provider omitted, so
/// every key in a refreshed group carries the same freshness even when the
/// observation was partial.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Missing,
    Text(String),
    Number(f64),
    Coordinates(Coordinates),
    Lines(Vec<String>),
}

impl CachedValue {
    /// `Number` for finite values, `Missing` otherwise.
    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => CachedValue::Number(v),
            _ => CachedValue::Missing,
        }
    }

    /// `Text` for non-empty strings, `Missing` otherwise.
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => CachedValue::Text(s.to_string()),
            _ => CachedValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CachedValue::Missing)
    }

    /// Serialize to the on-disk payload.
    pub fn encode(&self) -> String {
        match self {
            CachedValue::Missing => String::new(),
            CachedValue::Text(s) => s.clone(),
            CachedValue::Number(v) => v.to_string(),
            CachedValue::Coordinates(c) => c.to_string(),
            CachedValue::Lines(lines) => lines.join("\n"),
        }
    }

    /// Parse an on-disk payload as `kind`.
    ///
    /// Returns `None` when the payload does not fit the kind; callers treat
    /// that the same as a missing entry.
    pub fn decode(kind: ValueKind, raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(match kind {
                ValueKind::Lines => CachedValue::Lines(Vec::new()),
                _ => CachedValue::Missing,
            });
        }
        match kind {
            ValueKind::Text => Some(CachedValue::Text(raw.to_string())),
            ValueKind::Number => {
                let v: f64 = raw.trim().parse().ok()?;
                v.is_finite().then_some(CachedValue::Number(v))
            }
            ValueKind::Coordinates => Coordinates::parse(raw).map(CachedValue::Coordinates),
            ValueKind::Lines => Some(CachedValue::Lines(
                raw.lines().map(str::to_string).collect(),
            )),
        }
    }

    /// Render for display, substituting `unknown` for anything without a
    /// usable value. Numbers are rounded half away from zero.
    pub fn render(&self, unknown: &str) -> String {
        match self {
            CachedValue::Missing => unknown.to_string(),
            CachedValue::Text(s) => s.clone(),
            CachedValue::Number(v) if v.is_finite() => format!("{}", v.round() as i64),
            CachedValue::Number(_) => unknown.to_string(),
            CachedValue::Coordinates(c) => c.to_string(),
            CachedValue::Lines(lines) => lines.join("\n"),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CachedValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CachedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<Coordinates> {
        match self {
            CachedValue::Coordinates(c) => Some(*c),
            _ => None,
        }
    }
}
