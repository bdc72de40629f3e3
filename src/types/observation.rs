//! Station observation and alert payloads.
//!
//! The `Nws*` types mirror the GeoJSON documents served by
//! `api.weather.gov`. Every measurement is optional: stations routinely
//! omit fields (no heat index on a cool day, no precipitation sensor), and
//! a missing field must only blank that one value.

use serde::Deserialize;

use super::value::Coordinates;

/// A single station observation in SI units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationObservation {
    /// ISO 8601 observation time.
    pub timestamp: Option<String>,
    /// Raw METAR report.
    pub raw_message: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub elevation_m: Option<f64>,
    pub text_description: Option<String>,
    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    pub pressure_pa: Option<f64>,
    pub visibility_m: Option<f64>,
    pub precipitation_last_hour_m: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub heat_index_c: Option<f64>,
}

// ── NWS response types ───────────────────────────────────────────────

/// Response from `/stations/{station}/observations/latest`.
#[derive(Debug, Deserialize)]
pub struct NwsObservationResponse {
    #[serde(default)]
    pub geometry: Option<NwsGeometry>,
    pub properties: NwsObservationProperties,
}

#[derive(Debug, Deserialize)]
pub struct NwsGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NwsObservationProperties {
    pub timestamp: Option<String>,
    pub raw_message: Option<String>,
    pub elevation: Option<QuantValue>,
    pub text_description: Option<String>,
    pub temperature: Option<QuantValue>,
    pub dewpoint: Option<QuantValue>,
    pub wind_direction: Option<QuantValue>,
    pub wind_speed: Option<QuantValue>,
    pub barometric_pressure: Option<QuantValue>,
    pub visibility: Option<QuantValue>,
    pub precipitation_last_hour: Option<QuantValue>,
    pub relative_humidity: Option<QuantValue>,
    pub heat_index: Option<QuantValue>,
}

/// A WMO quantitative value, e.g. `{"unitCode": "wmoUnit:degC", "value": 21.1}`.
#[derive(Debug, Deserialize)]
pub struct QuantValue {
    #[serde(rename = "unitCode", default)]
    pub unit_code: String,
    #[serde(default)]
    pub value: Option<f64>,
}

fn value_of(q: &Option<QuantValue>) -> Option<f64> {
    q.as_ref().and_then(|q| q.value)
}

/// Wind speed in m/s; stations report either m/s or km/h.
fn wind_speed_mps(q: &Option<QuantValue>) -> Option<f64> {
    let q = q.as_ref()?;
    let v = q.value?;
    if q.unit_code.ends_with("km_h-1") {
        Some(v / 3.6)
    } else {
        Some(v)
    }
}

/// Precipitation depth in metres; stations report either m or mm.
fn depth_m(q: &Option<QuantValue>) -> Option<f64> {
    let q = q.as_ref()?;
    let v = q.value?;
    if q.unit_code.ends_with(":mm") {
        Some(v / 1000.0)
    } else {
        Some(v)
    }
}

impl From<NwsObservationResponse> for StationObservation {
    fn from(resp: NwsObservationResponse) -> Self {
        let p = resp.properties;
        Self {
            coordinates: resp
                .geometry
                .and_then(|g| Coordinates::from_geojson(&g.coordinates)),
            elevation_m: value_of(&p.elevation),
            temperature_c: value_of(&p.temperature),
            dewpoint_c: value_of(&p.dewpoint),
            wind_direction_deg: value_of(&p.wind_direction),
            wind_speed_mps: wind_speed_mps(&p.wind_speed),
            pressure_pa: value_of(&p.barometric_pressure),
            visibility_m: value_of(&p.visibility),
            precipitation_last_hour_m: depth_m(&p.precipitation_last_hour),
            relative_humidity_pct: value_of(&p.relative_humidity),
            heat_index_c: value_of(&p.heat_index),
            timestamp: p.timestamp,
            raw_message: p.raw_message,
            text_description: p.text_description,
        }
    }
}

/// Response from `/alerts/active?point={lat},{lon}`.
#[derive(Debug, Deserialize)]
pub struct NwsAlertsResponse {
    pub features: Vec<NwsAlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct NwsAlertFeature {
    #[serde(default)]
    pub properties: NwsAlertProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct NwsAlertProperties {
    #[serde(default)]
    pub event: Option<String>,
}

impl NwsAlertsResponse {
    /// Event names in feed order, skipping features without one.
    pub fn events(self) -> Vec<String> {
        self.features
            .into_iter()
            .filter_map(|f| f.properties.event)
            .filter(|e| !e.is_empty())
            .collect()
    }
}
