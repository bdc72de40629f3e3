//! Sunrise and sunset from station coordinates.
//!
//! Uses the NOAA general solar position approximation: fractional year →
//! equation of time and solar declination → hour angle of the sun at a
//! zenith of 90.833° (geometric horizon plus refraction and the solar
//! disc's radius). Good to a couple of minutes outside the polar circles.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use crate::types::Coordinates;

/// Zenith angle of the sun's centre at apparent sunrise/sunset.
const SUNRISE_ZENITH_DEG: f64 = 90.833;

/// Sunrise and sunset for one solar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SunEvents {
    Daily {
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
    },
    /// The sun stays above the horizon all day.
    PolarDay,
    /// The sun stays below the horizon all day.
    PolarNight,
}

impl SunEvents {
    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        match self {
            SunEvents::Daily { sunrise, .. } => Some(*sunrise),
            _ => None,
        }
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        match self {
            SunEvents::Daily { sunset, .. } => Some(*sunset),
            _ => None,
        }
    }
}

/// Local mean solar date at `longitude` for the instant `now`.
///
/// Picking the UTC date instead would roll the Americas to "tomorrow" every
/// evening.
pub fn solar_date(now: DateTime<Utc>, longitude: f64) -> NaiveDate {
    let offset = TimeDelta::seconds((longitude * 240.0).round() as i64);
    (now + offset).date_naive()
}

/// Sun events for the solar day containing `now` at `at`.
pub fn sun_events_at(now: DateTime<Utc>, at: Coordinates) -> SunEvents {
    sun_events(solar_date(now, at.longitude), at)
}

/// Sun events for `date` at `at`. Times are UTC and may fall on the
/// neighbouring UTC date.
pub fn sun_events(date: NaiveDate, at: Coordinates) -> SunEvents {
    let year = date.year();
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_year = if leap { 366.0 } else { 365.0 };
    let gamma = 2.0 * PI / days_in_year * f64::from(date.ordinal0());

    let eq_time = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());

    let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin();

    let lat = at.latitude.to_radians();
    let cos_hour_angle = SUNRISE_ZENITH_DEG.to_radians().cos() / (lat.cos() * declination.cos())
        - lat.tan() * declination.tan();

    if cos_hour_angle > 1.0 {
        return SunEvents::PolarNight;
    }
    if cos_hour_angle < -1.0 {
        return SunEvents::PolarDay;
    }

    let hour_angle = cos_hour_angle.acos().to_degrees();
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let at_minutes =
        |minutes: f64| midnight + TimeDelta::milliseconds((minutes * 60_000.0).round() as i64);

    SunEvents::Daily {
        sunrise: at_minutes(720.0 - 4.0 * (at.longitude + hour_angle) - eq_time),
        sunset: at_minutes(720.0 - 4.0 * (at.longitude - hour_angle) - eq_time),
    }
}
